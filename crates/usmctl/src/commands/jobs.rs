//! Job command handlers.
//!
//! `--kind` picks the typed job set: `all` sees every scheduled job, the
//! typed kinds see only jobs whose action matches.

use tabled::Tabled;

use usm_core::validation::{validate_plugin, validate_source_format};
use usm_core::{
    BucketJob, BucketParams, CloudWatchJob, CloudWatchParams, ControlPlane, GenericParams, Job,
    JobCore, JobParams, schedule,
};

use crate::cli::{
    BucketJobArgs, BucketJobUpdate, CloudWatchJobArgs, CloudWatchJobUpdate, GlobalOpts,
    JobCommonArgs, JobCommonUpdate, JobKind, JobsArgs, JobsCommand, OutputFormat,
};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct JobRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Sensor")]
    sensor: String,
    #[tabled(rename = "Schedule")]
    schedule: String,
    #[tabled(rename = "Enabled")]
    enabled: String,
}

impl From<&JobCore> for JobRow {
    fn from(c: &JobCore) -> Self {
        Self {
            id: c.identifier().unwrap_or_default().to_owned(),
            name: c.name.clone(),
            action: c.action.clone(),
            sensor: c.sensor.clone(),
            schedule: schedule::to_shorthand(&c.schedule).to_owned(),
            enabled: if c.disabled { "no" } else { "yes" }.into(),
        }
    }
}

fn detail<P: JobParams>(job: &Job<P>) -> String {
    let c = &job.core;
    let params = serde_json::to_string_pretty(&job.params).unwrap_or_default();
    [
        format!("ID:          {}", c.identifier().unwrap_or("-")),
        format!("Name:        {}", c.name),
        format!("Description: {}", util::or_dash(&c.description)),
        format!("Sensor:      {}", c.sensor),
        format!("Schedule:    {}", schedule::to_shorthand(&c.schedule)),
        format!("Enabled:     {}", if c.disabled { "no" } else { "yes" }),
        format!("App:         {}", util::or_dash(&c.app)),
        format!("Action:      {}", util::or_dash(&c.action)),
        format!("Running:     {}", if c.running { "yes" } else { "no" }),
        format!("Params:\n{params}"),
    ]
    .join("\n")
}

fn job_id<P>(job: &Job<P>) -> String {
    job.core.identifier().unwrap_or_default().to_owned()
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    plane: &ControlPlane,
    args: JobsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let format = global.output_format();

    let out = match args.command {
        JobsCommand::List { kind } => match kind {
            JobKind::All => list::<GenericParams>(plane, &format).await?,
            JobKind::Bucket => list::<BucketParams>(plane, &format).await?,
            JobKind::Cloudwatch => list::<CloudWatchParams>(plane, &format).await?,
        },

        JobsCommand::Get { id, kind } => match kind {
            JobKind::All => get::<GenericParams>(plane, &id, &format).await?,
            JobKind::Bucket => get::<BucketParams>(plane, &id, &format).await?,
            JobKind::Cloudwatch => get::<CloudWatchParams>(plane, &id, &format).await?,
        },

        JobsCommand::Delete { id, kind } => {
            match kind {
                JobKind::All => delete::<GenericParams>(plane, &id, global).await?,
                JobKind::Bucket => delete::<BucketParams>(plane, &id, global).await?,
                JobKind::Cloudwatch => delete::<CloudWatchParams>(plane, &id, global).await?,
            }
            String::new()
        }

        JobsCommand::CreateBucket(args) => {
            let mut job = bucket_job(args)?;
            plane.jobs::<BucketParams>().create(&mut job).await?;
            output::render_single(&format, &job, detail, job_id)?
        }

        JobsCommand::CreateCloudwatch(args) => {
            let mut job = cloudwatch_job(args)?;
            plane.jobs::<CloudWatchParams>().create(&mut job).await?;
            output::render_single(&format, &job, detail, job_id)?
        }

        JobsCommand::UpdateBucket(update) => {
            let jobs = plane.jobs::<BucketParams>();
            let mut job = jobs.get(&update.common.id).await?;
            apply_bucket_update(&mut job, update)?;
            jobs.update(&mut job).await?;
            output::render_single(&format, &job, detail, job_id)?
        }

        JobsCommand::UpdateCloudwatch(update) => {
            let jobs = plane.jobs::<CloudWatchParams>();
            let mut job = jobs.get(&update.common.id).await?;
            apply_cloudwatch_update(&mut job, update)?;
            jobs.update(&mut job).await?;
            output::render_single(&format, &job, detail, job_id)?
        }
    };

    output::print_output(&out, global.quiet);
    Ok(())
}

async fn list<P: JobParams>(plane: &ControlPlane, format: &OutputFormat) -> Result<String, CliError> {
    let jobs = plane.jobs::<P>().list().await?;
    output::render_list(format, &jobs, |j| JobRow::from(&j.core), job_id)
}

async fn get<P: JobParams>(
    plane: &ControlPlane,
    id: &str,
    format: &OutputFormat,
) -> Result<String, CliError> {
    let job = plane.jobs::<P>().get(id).await?;
    output::render_single(format, &job, detail, job_id)
}

async fn delete<P: JobParams>(
    plane: &ControlPlane,
    id: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let jobs = plane.jobs::<P>();
    let job = jobs.get(id).await?;
    if !util::confirm(&format!("Delete {} {id} ({})?", P::KIND, job.core.name), global.yes)? {
        return Ok(());
    }
    jobs.delete(&job).await?;
    output::notice(&format!("Job {id} deleted"), global.quiet);
    Ok(())
}

// ── Building jobs from flags ────────────────────────────────────────

fn core_from(common: &JobCommonArgs) -> JobCore {
    JobCore {
        sensor: common.sensor.clone(),
        schedule: schedule::to_cron(&common.schedule).to_owned(),
        name: common.name.clone(),
        description: common.description.clone(),
        disabled: common.disabled,
        ..JobCore::default()
    }
}

fn plugin_from(raw: Option<&str>) -> Result<String, CliError> {
    match raw {
        Some(name) => Ok(validate_plugin(name)?.to_owned()),
        None => Ok(String::new()),
    }
}

fn bucket_job(args: BucketJobArgs) -> Result<BucketJob, CliError> {
    let params = BucketParams {
        bucket_name: args.bucket,
        path: args.path,
        source_format: validate_source_format(&args.common.source_format)?,
        plugin: plugin_from(args.common.plugin.as_deref())?,
    };
    Ok(Job::new(core_from(&args.common), params))
}

fn cloudwatch_job(args: CloudWatchJobArgs) -> Result<CloudWatchJob, CliError> {
    let params = CloudWatchParams {
        region: args.region,
        group: args.group,
        stream: args.stream,
        source_format: validate_source_format(&args.common.source_format)?,
        plugin: plugin_from(args.common.plugin.as_deref())?,
    };
    Ok(Job::new(core_from(&args.common), params))
}

/// Apply the base-field flags; returns the format/plugin flags for the params.
fn apply_common(core: &mut JobCore, common: JobCommonUpdate) -> (Option<String>, Option<String>) {
    if let Some(sensor) = common.sensor {
        core.sensor = sensor;
    }
    if let Some(name) = common.name {
        core.name = name;
    }
    if let Some(description) = common.description {
        core.description = description;
    }
    if let Some(schedule) = common.schedule {
        core.schedule = schedule::to_cron(&schedule).to_owned();
    }
    if let Some(disabled) = common.disabled {
        core.disabled = disabled;
    }
    (common.source_format, common.plugin)
}

fn apply_bucket_update(job: &mut BucketJob, update: BucketJobUpdate) -> Result<(), CliError> {
    let (format, plugin) = apply_common(&mut job.core, update.common);
    if let Some(bucket) = update.bucket {
        job.params.bucket_name = bucket;
    }
    if let Some(path) = update.path {
        job.params.path = path;
    }
    if let Some(format) = format {
        job.params.source_format = validate_source_format(&format)?;
    }
    if plugin.is_some() {
        job.params.plugin = plugin_from(plugin.as_deref())?;
    }
    Ok(())
}

fn apply_cloudwatch_update(
    job: &mut CloudWatchJob,
    update: CloudWatchJobUpdate,
) -> Result<(), CliError> {
    let (format, plugin) = apply_common(&mut job.core, update.common);
    if let Some(region) = update.region {
        job.params.region = region;
    }
    if let Some(group) = update.group {
        job.params.group = group;
    }
    if let Some(stream) = update.stream {
        job.params.stream = stream;
    }
    if let Some(format) = format {
        job.params.source_format = validate_source_format(&format)?;
    }
    if plugin.is_some() {
        job.params.plugin = plugin_from(plugin.as_deref())?;
    }
    Ok(())
}
