use fleet_shared::device::DeviceType;

use super::table::{dim, horizontal, truncate_str};

const WIDTH_NAME: usize = 40;

pub fn device_types_table(device_types: &[DeviceType], ansi: bool) -> String {
    if device_types.is_empty() {
        return dim("No supported device types", ansi);
    }
    let rows: Vec<Vec<String>> = device_types
        .iter()
        .map(|t| vec![t.slug.clone(), truncate_str(&t.name, WIDTH_NAME)])
        .collect();
    horizontal(&["SLUG", "NAME"], &rows, ansi)
}
