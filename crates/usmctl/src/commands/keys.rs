//! Sensor key command handlers.

use chrono::Utc;
use tabled::Tabled;

use usm_core::{ControlPlane, SensorKey, mask_secret};

use crate::cli::{GlobalOpts, KeysArgs, KeysCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct KeyRow {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Expires")]
    expires: String,
    #[tabled(rename = "Used By")]
    node: String,
}

impl From<&SensorKey> for KeyRow {
    fn from(k: &SensorKey) -> Self {
        Self {
            // Activation codes are credentials; tables show only the tail.
            code: mask_secret(&k.id),
            created: util::format_time(&k.created_at),
            expires: util::format_time(&k.expires_at),
            node: k.node_id.clone().unwrap_or_default(),
        }
    }
}

fn detail(k: &SensorKey) -> String {
    let state = if k.is_consumed() {
        "consumed"
    } else if k.is_expired(Utc::now()) {
        "expired"
    } else {
        "available"
    };
    [
        format!("Code:    {}", k.id),
        format!("Created: {}", util::format_time(&k.created_at)),
        format!("Expires: {}", util::format_time(&k.expires_at)),
        format!("Used by: {}", util::or_dash(k.node_id.as_deref().unwrap_or_default())),
        format!("State:   {state}"),
    ]
    .join("\n")
}

pub async fn handle(
    plane: &ControlPlane,
    args: KeysArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let format = global.output_format();
    let keys = plane.sensor_keys();

    match args.command {
        KeysCommand::List { unconsumed } => {
            let all = if unconsumed {
                keys.list_unconsumed().await?
            } else {
                keys.list().await?
            };
            let out = output::render_list(&format, &all, |k| KeyRow::from(k), |k| k.id.clone())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        KeysCommand::Get { id } => {
            let key = keys.get(&id).await?;
            let out = output::render_single(&format, &key, detail, |k| k.id.clone())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        KeysCommand::Create { reuse } => {
            let key = keys.create(reuse).await?;
            let out = output::render_single(&format, &key, detail, |k| k.id.clone())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        KeysCommand::Delete { id } => {
            let key = keys.get(&id).await?;
            if !util::confirm(
                &format!("Revoke activation key {}?", mask_secret(&key.id)),
                global.yes,
            )? {
                return Ok(());
            }
            keys.delete(&key).await?;
            output::notice("Activation key revoked", global.quiet);
            Ok(())
        }
    }
}
