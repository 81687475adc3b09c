use fleet_shared::application::Application;

use super::table::{dim, green, horizontal, vertical};

const HEADERS: [&str; 5] = ["ID", "NAME", "DEVICE TYPE", "ONLINE DEVICES", "TOTAL DEVICES"];

pub fn applications_table(applications: &[Application], ansi: bool) -> String {
    if applications.is_empty() {
        return dim("No applications found", ansi);
    }

    let rows: Vec<Vec<String>> = applications
        .iter()
        .map(|app| {
            let online = if app.online_devices > 0 {
                green(&app.online_devices.to_string(), ansi)
            } else {
                dim("0", ansi)
            };
            vec![
                app.id.to_string(),
                app.app_name.clone(),
                app.device_type.clone(),
                online,
                app.devices_length.to_string(),
            ]
        })
        .collect();

    horizontal(&HEADERS, &rows, ansi)
}

pub fn application_details(app: &Application, ansi: bool) -> String {
    let or_dash = |s: Option<&str>| match s {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => dim("-", ansi),
    };
    vertical(
        &app.app_name,
        &[
            ("ID", app.id.to_string()),
            ("DEVICE TYPE", or_dash(Some(app.device_type.as_str()))),
            ("GIT REPOSITORY", or_dash(app.git_repository.as_deref())),
            ("COMMIT", or_dash(app.commit.as_deref())),
        ],
        ansi,
    )
}
