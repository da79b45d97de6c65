//! License command handlers.

use chrono::Utc;
use serde::Serialize;

use usm_core::{ControlPlane, License, sensor_slots_available};

use crate::cli::{GlobalOpts, LicenseArgs, LicenseCommand};
use crate::error::CliError;
use crate::output;

use super::util;

/// Counts behind the capacity verdicts.
#[derive(Debug, Serialize)]
struct CapacityReport {
    sensor_limit: u32,
    sensors: usize,
    unconsumed_keys: usize,
    sensor_available: bool,
    key_available: bool,
}

fn license_detail(l: &License) -> String {
    let expired = if l.is_expired(Utc::now()) { " (expired)" } else { "" };
    [
        format!("Control nodes:   {}", l.control_node_limit),
        format!("Sensor nodes:    {}", l.sensor_node_limit),
        format!("Monthly storage: {} KB", l.monthly_storage_kb),
        format!("Expires:         {}{expired}", util::format_time(&l.expires_at)),
    ]
    .join("\n")
}

fn capacity_detail(r: &CapacityReport, color: bool) -> String {
    [
        format!("Sensor limit:     {}", r.sensor_limit),
        format!("Sensors:          {}", r.sensors),
        format!("Unconsumed keys:  {}", r.unconsumed_keys),
        format!("Room for sensor:  {}", output::paint_flag(r.sensor_available, color)),
        format!("Room for key:     {}", output::paint_flag(r.key_available, color)),
    ]
    .join("\n")
}

pub async fn handle(
    plane: &ControlPlane,
    args: LicenseArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let format = global.output_format();

    match args.command {
        LicenseCommand::Show => {
            let license = plane.license().await?;
            let out = output::render_single(&format, &license, license_detail, |l| {
                l.sensor_node_limit.to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        LicenseCommand::Capacity => {
            let sensors = plane.sensors().list().await?.len();
            let unconsumed_keys = plane.sensor_keys().list_unconsumed().await?.len();
            let license = plane.license().await?;
            let report = CapacityReport {
                sensor_limit: license.sensor_node_limit,
                sensors,
                unconsumed_keys,
                sensor_available: sensor_slots_available(sensors, 0, license.sensor_node_limit),
                key_available: sensor_slots_available(
                    sensors,
                    unconsumed_keys,
                    license.sensor_node_limit,
                ),
            };
            let color = output::should_color(&global.color);
            let out = output::render_single(
                &format,
                &report,
                |r| capacity_detail(r, color),
                |r| r.key_available.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
