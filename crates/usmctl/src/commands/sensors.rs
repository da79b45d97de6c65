//! Sensor command handlers.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Tabled;
use tokio_util::sync::CancellationToken;

use usm_config::Config;
use usm_core::validation::validate_ip;
use usm_core::{
    ApplianceClient, ControlPlane, CoreError, Deadline, ProvisionState, Sensor, SensorId,
    SensorSpec,
};

use crate::cli::{GlobalOpts, ProvisionArgs, SensorsArgs, SensorsCommand};
use crate::config::provision_deadline;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SensorRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Setup")]
    setup: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl SensorRow {
    fn new(s: &Sensor, color: bool) -> Self {
        Self {
            id: s.id.to_string(),
            name: s.name.clone(),
            status: output::paint_status(s.status.as_wire(), color),
            setup: util::or_dash(s.setup_status.as_wire()).to_owned(),
            description: s.description.clone(),
        }
    }
}

fn detail(s: &Sensor) -> String {
    [
        format!("ID:          {}", s.id),
        format!("Name:        {}", s.name),
        format!("Description: {}", util::or_dash(&s.description)),
        format!("Status:      {}", util::or_dash(s.status.as_wire())),
        format!("Setup:       {}", util::or_dash(s.setup_status.as_wire())),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    plane: &ControlPlane,
    args: SensorsArgs,
    global: &GlobalOpts,
    cfg: &Config,
) -> Result<(), CliError> {
    let format = global.output_format();
    let color = output::should_color(&global.color);
    let sensors = plane.sensors();

    match args.command {
        SensorsCommand::List => {
            let all = sensors.list().await?;
            let out = output::render_list(
                &format,
                &all,
                |s| SensorRow::new(s, color),
                |s| s.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SensorsCommand::Get { id } => {
            let sensor = sensors.read_live(&SensorId::new(id)).await?;
            let out = output::render_single(&format, &sensor, detail, |s| s.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SensorsCommand::Update {
            id,
            name,
            description,
        } => {
            if name.is_none() && description.is_none() {
                return Err(CliError::Validation {
                    field: "update".into(),
                    reason: "nothing to change; pass --name and/or --description".into(),
                });
            }
            let mut sensor = sensors.get(&SensorId::new(id)).await?;
            if let Some(name) = name {
                sensor.name = name;
            }
            if let Some(description) = description {
                sensor.description = description;
            }
            sensors.update(&sensor).await?;
            output::notice(&format!("Sensor {} updated", sensor.id), global.quiet);
            Ok(())
        }

        SensorsCommand::Delete { id } => {
            let sensor = sensors.get(&SensorId::new(id)).await?;
            if !util::confirm(
                &format!("Deregister sensor {} ({})?", sensor.id, sensor.name),
                global.yes,
            )? {
                return Ok(());
            }
            sensors.delete(&sensor).await?;
            output::notice(&format!("Sensor {} deregistered", sensor.id), global.quiet);
            Ok(())
        }

        SensorsCommand::Sweep => {
            if !util::confirm("Deregister every disconnected sensor?", global.yes)? {
                return Ok(());
            }
            let removed = sensors.sweep().await?;
            let out = output::render_list(
                &format,
                &removed,
                |id| RemovedRow { id: id.to_string() },
                ToString::to_string,
            )?;
            if removed.is_empty() {
                output::notice("No disconnected sensors", global.quiet);
            } else {
                output::print_output(&out, global.quiet);
            }
            Ok(())
        }

        SensorsCommand::Provision(provision) => {
            let budget = provision_deadline(provision.deadline, cfg);
            let sensor = provision_sensor(plane, provision, budget, global.quiet).await?;
            let out = output::render_single(&format, &sensor, detail, |s| s.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

#[derive(Tabled)]
struct RemovedRow {
    #[tabled(rename = "Deregistered")]
    id: String,
}

// ── Provisioning ────────────────────────────────────────────────────

async fn provision_sensor(
    plane: &ControlPlane,
    args: ProvisionArgs,
    budget: Duration,
    quiet: bool,
) -> Result<Sensor, CliError> {
    let ip = validate_ip(&args.ip)?;
    let appliance = ApplianceClient::for_ip(ip).map_err(CoreError::from)?;

    let mut spec = SensorSpec::new(args.name);
    if let Some(description) = args.description {
        spec = spec.with_description(description);
    }
    if let Some(code) = args.activation_code {
        spec = spec.with_activation_code(code);
    }

    // Ctrl-C cancels cooperatively so a minted key still gets revoked.
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });
    let deadline = Deadline::after(budget).with_cancellation(cancel);

    let spinner = spinner(quiet);
    let provisioner = plane.provisioner();
    let mut progress = provisioner.subscribe();
    spinner.set_message(describe(provisioner.state()));

    let follow = async {
        while progress.changed().await.is_ok() {
            spinner.set_message(describe(*progress.borrow_and_update()));
        }
    };

    let result = tokio::select! {
        biased;
        result = provisioner.run(&deadline, &mut spec, &appliance) => result,
        () = follow => Err(CoreError::Internal("progress channel closed".into())),
    };
    spinner.finish_and_clear();

    let id = result?;
    output::notice(&format!("Sensor {id} is ready"), quiet);
    Ok(plane.sensors().get(&id).await?)
}

fn spinner(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} [{elapsed}] {msg}") {
        bar.set_style(style);
    }
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

fn describe(state: ProvisionState) -> &'static str {
    match state {
        ProvisionState::Idle => "Removing disconnected sensors",
        ProvisionState::KeyAcquired => "Waiting for the appliance to come up",
        ProvisionState::ApplianceReachable => "Activating the appliance",
        ProvisionState::ApplianceActivated => "Waiting for the sensor to register",
        ProvisionState::SensorRegistered => "Completing sensor setup",
        ProvisionState::SetupComplete => "Waiting for the sensor to report ready",
        ProvisionState::Ready => "Ready",
        ProvisionState::Aborted => "Aborted",
    }
}
