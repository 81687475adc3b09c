//! Options shared by several commands.

use clap::Args;

use super::OptionInfo;

pub const YES: OptionInfo = OptionInfo {
    signature: "yes",
    parameter: None,
    description: "confirm non interactively",
    aliases: &["y"],
    required: None,
};

pub const DEVICE_REQUIRED: &str = "You have to specify a device";

pub const DEVICE: OptionInfo = OptionInfo {
    signature: "device",
    parameter: Some("device"),
    description: "device uuid",
    aliases: &["d", "dev"],
    required: Some(DEVICE_REQUIRED),
};

#[derive(Args, Debug, Clone, Default)]
pub struct YesArgs {
    #[arg(short = 'y', long = "yes", help = YES.description)]
    pub yes: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct DeviceArgs {
    // required, enforced by Invocation::validate
    #[arg(short = 'd', long = "device", visible_alias = "dev", value_name = "DEVICE", help = DEVICE.description)]
    pub device: Option<String>,
}
