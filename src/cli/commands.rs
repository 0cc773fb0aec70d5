use crate::{
    cli::args::{ConfigArgs, FormArgs, LaunchCommandArgs, ResolveArgs, ServeArgs},
    core::{
        config::{workflow_name, ConfigLoader, ConfigValidator, NfParamsConfig, RuntimePaths},
        form,
        launch::{LaunchSpec, ENV_NXF_HOME},
        params_file::ParamsFileWriter,
        resolver::SubmittedForm,
        schema::{load_schema, ParameterSchema},
        server::{self, FormServerState},
        submission::SubmissionPipeline,
        types::FormFormat,
    },
    Result,
};
use anyhow::{anyhow, Context};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Configuration, derived directories and schema shared by the commands.
struct CommandContext {
    config: NfParamsConfig,
    paths: RuntimePaths,
    schema: ParameterSchema,
}

impl CommandContext {
    fn load(common: &ConfigArgs) -> Result<Self> {
        let config = ConfigLoader::load(common.config.as_deref())?;
        let user = resolve_user(common.user.as_deref())?;
        let paths = config.runtime_paths(&user);
        let schema_path = common
            .schema
            .clone()
            .unwrap_or_else(|| paths.schema_path.clone());
        debug!(user = %user, schema = %schema_path.display(), "command context loaded");
        let schema = load_schema(&schema_path).unwrap_or_else(ParameterSchema::empty);
        Ok(Self {
            config,
            paths,
            schema,
        })
    }

    /// Launch template built from configuration; `None` without a workflow.
    fn launch_template(&self) -> Option<LaunchSpec> {
        let workflow = &self.config.workflow;
        if workflow.url.trim().is_empty() {
            return None;
        }
        Some(
            LaunchSpec::new(workflow.url.clone())
                .with_revision(Some(workflow.revision.clone()))
                .with_log_endpoint(self.config.launch.log_endpoint.clone())
                .with_profile(self.config.launch.profile.clone())
                .with_resume(self.config.launch.resume),
        )
    }

    fn pipeline(self, params_dir: Option<PathBuf>) -> SubmissionPipeline {
        let launch = self.launch_template();
        let params_dir = params_dir.unwrap_or_else(|| self.paths.params_dir.clone());
        SubmissionPipeline::new(self.schema, ParamsFileWriter::new(params_dir))
            .with_policy(self.config.form.multi_value_policy)
            .with_notification_address(self.config.notification.email.clone())
            .with_launch(launch)
    }
}

/// `--user`, else `$USER`, else `$LOGNAME`.
fn resolve_user(explicit: Option<&str>) -> Result<String> {
    explicit
        .map(str::to_string)
        .or_else(|| env::var("USER").ok())
        .or_else(|| env::var("LOGNAME").ok())
        .filter(|user| !user.trim().is_empty())
        .ok_or_else(|| anyhow!("cannot determine the user; pass --user"))
}

pub async fn form(args: FormArgs) -> Result<()> {
    let context = CommandContext::load(&args.common)?;
    let fields = form::render_all(&context.schema);
    match args.format {
        FormFormat::Html => println!(
            "{}",
            form::render_form_fragment(&fields, context.config.form.multi_value_policy)
        ),
        FormFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&fields).context("failed to serialize form fields")?
        ),
    }
    Ok(())
}

pub async fn resolve(args: ResolveArgs) -> Result<()> {
    let context = CommandContext::load(&args.common)?;
    if args.print_command {
        ConfigValidator::validate_for_launch(&context.config)?;
    }
    let pipeline = context.pipeline(args.params_dir);

    let form = SubmittedForm::from_pairs(args.params);
    let submission = pipeline.submit(&form)?;

    println!("{}", submission.params_file.display());
    if args.print_command {
        println!("{}", submission.command_line().join(" "));
    }
    Ok(())
}

pub async fn serve(args: ServeArgs) -> Result<()> {
    let context = CommandContext::load(&args.common)?;
    ConfigValidator::validate_for_serve(&context.config)?;
    let bind = args
        .bind
        .clone()
        .unwrap_or_else(|| context.config.server.bind.clone());
    let max_body_bytes = context.config.server.max_body_bytes;
    let title = match workflow_name(&context.config.workflow.url) {
        "" => "nfparams".to_string(),
        name => name.to_string(),
    };
    info!(schema_empty = context.schema.is_empty(), "starting form server");

    let state = Arc::new(FormServerState::new(title, context.pipeline(None)));
    server::serve(state, &bind, max_body_bytes).await?;
    Ok(())
}

pub async fn launch_command(args: LaunchCommandArgs) -> Result<()> {
    let spec = LaunchSpec::from_process_env()
        .ok_or_else(|| anyhow!("NXF_USER_WORKFLOW is not set; nothing to launch"))?;

    if args.env {
        let nxf_home = env::var(ENV_NXF_HOME)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| anyhow!("{} is not set", ENV_NXF_HOME))?;
        for (name, value) in spec.environment(Path::new(&nxf_home)) {
            println!("{}={}", name, value);
        }
        return Ok(());
    }

    for arg in spec.command_line() {
        println!("{}", arg);
    }
    Ok(())
}
