mod cli;

use anyhow::Context;
use cli::{Args, Command, CoursesCommand, InventoryCommand, SettingsCommand, TemplatesCommand};
use course_admin::adapters::outbound::console::StderrProgressReporter;
use course_admin::adapters::outbound::filesystem::JsonFileStore;
use course_admin::application::dto::{CreateCourseRequest, OperationOutcome, UpdateCourseRequest};
use course_admin::application::factories::{FormatterFactory, PresenterFactory, TransportFactory};
use course_admin::application::use_cases::{
    ConfigureSettingsUseCase, CourseCatalogUseCase, ManageTemplatesUseCase,
};
use course_admin::config::{discover_config, load_config_from_path, ToolConfig};
use course_admin::course_catalog::domain::Bvin;
use course_admin::ports::outbound::{
    OutputPresenter, PlatformTransport, ProgressReporter, ResultFormatter,
};
use course_admin::shared::error::ExitCode;
use course_admin::shared::Result;
use serde::Serialize;
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

type Catalog = CourseCatalogUseCase<
    Box<dyn PlatformTransport>,
    JsonFileStore,
    JsonFileStore,
    JsonFileStore,
    StderrProgressReporter,
>;

#[tokio::main]
async fn main() {
    let args = match Args::try_parse_args() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            process::exit(code.as_i32());
        }
    };

    init_tracing(args.verbose);

    match run(args).await {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "course_admin=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// What the command produced, before formatting
struct Output {
    rendered: String,
    warnings: Vec<String>,
}

impl Output {
    fn plain(rendered: String) -> Self {
        Self {
            rendered,
            warnings: Vec::new(),
        }
    }
}

fn load_tool_config(args: &Args) -> Result<ToolConfig> {
    let file = match &args.config {
        Some(path) => Some(load_config_from_path(path)?),
        None => {
            let cwd = std::env::current_dir().context("Failed to read the current directory")?;
            discover_config(&cwd)?
        }
    };

    let mut config = ToolConfig::from_file(file);
    if let Some(data_dir) = &args.data_dir {
        config.data_dir = data_dir.clone();
    }
    if let Some(transport) = args.transport {
        config.transport = transport;
    }
    Ok(config)
}

async fn run(args: Args) -> Result<ExitCode> {
    let config = load_tool_config(&args)?;
    tracing::debug!(?config, "effective configuration");

    let store = JsonFileStore::new(config.data_dir.clone());
    let formatter = FormatterFactory::create(args.format);
    let presenter = PresenterFactory::for_output(args.output.clone());
    let reporter = StderrProgressReporter::new();

    let output = match args.command {
        Command::Settings { action } => settings_command(action, &store, formatter.as_ref())?,
        Command::Templates { action } => templates_command(action, &store, formatter.as_ref())?,
        command => {
            let transport = TransportFactory::create(config.transport, config.timeout)?;
            let catalog: Catalog = CourseCatalogUseCase::new(
                transport,
                store.clone(),
                store.clone(),
                store,
                StderrProgressReporter::new(),
            )
            .with_verification_delay(config.verification_delay)
            .with_stock_concurrency(config.stock_concurrency);
            catalog_command(command, &catalog, formatter.as_ref()).await?
        }
    };

    present(output, presenter.as_ref(), &reporter)
}

fn present(
    output: Output,
    presenter: &dyn OutputPresenter,
    reporter: &dyn ProgressReporter,
) -> Result<ExitCode> {
    presenter.present(&output.rendered)?;
    if output.warnings.is_empty() {
        return Ok(ExitCode::Success);
    }
    for warning in &output.warnings {
        reporter.report_error(&format!("⚠️  Warning: {}", warning));
    }
    Ok(ExitCode::CompletedWithWarnings)
}

fn document<T: Serialize>(formatter: &dyn ResultFormatter, value: &T) -> Result<String> {
    formatter.format_document(&serde_json::to_value(value)?)
}

fn outcome<T: Serialize>(
    formatter: &dyn ResultFormatter,
    outcome: OperationOutcome<T>,
) -> Result<Output> {
    Ok(Output {
        rendered: document(formatter, &outcome.value)?,
        warnings: outcome.warnings,
    })
}

fn settings_command(
    action: SettingsCommand,
    store: &JsonFileStore,
    formatter: &dyn ResultFormatter,
) -> Result<Output> {
    let use_case = ConfigureSettingsUseCase::new(store.clone());
    let settings = match action {
        SettingsCommand::Show => use_case.show()?,
        SettingsCommand::Set {
            api_key,
            base_url,
            category,
        } => use_case.set(&api_key, &base_url, category.as_deref())?,
    };
    Ok(Output::plain(document(formatter, &settings)?))
}

fn templates_command(
    action: TemplatesCommand,
    store: &JsonFileStore,
    formatter: &dyn ResultFormatter,
) -> Result<Output> {
    let use_case = ManageTemplatesUseCase::new(store.clone());
    let rendered = match action {
        TemplatesCommand::List => formatter.format_templates(&use_case.list()?)?,
        TemplatesCommand::Show { template_id } => {
            document(formatter, &use_case.show(&template_id)?)?
        }
        TemplatesCommand::Add { file } => {
            let upsert = use_case.add_from_json(&read_input(&file)?)?;
            eprintln!(
                "✅ Template {} {}",
                upsert.template.template_id,
                if upsert.replaced { "replaced" } else { "added" }
            );
            document(formatter, &upsert.template)?
        }
        TemplatesCommand::Remove { template_id } => {
            document(formatter, &use_case.remove(&template_id)?)?
        }
        TemplatesCommand::Replace { file } => {
            formatter.format_templates(&use_case.replace_all(&read_input(&file)?)?)?
        }
    };
    Ok(Output::plain(rendered))
}

async fn catalog_command(
    command: Command,
    catalog: &Catalog,
    formatter: &dyn ResultFormatter,
) -> Result<Output> {
    match command {
        Command::Categories => Ok(Output::plain(
            formatter.format_categories(&catalog.list_categories().await?)?,
        )),
        Command::Courses { action } => match action {
            CoursesCommand::List { with_stock } => {
                let courses = if with_stock {
                    catalog.list_courses_with_stock().await?
                } else {
                    catalog.list_courses().await?
                };
                Ok(Output::plain(formatter.format_courses(&courses)?))
            }
            CoursesCommand::Show { bvin } => Ok(Output::plain(
                formatter.format_document(&catalog.get_product(&Bvin::new(bvin)?).await?)?,
            )),
            CoursesCommand::Create {
                template,
                start,
                seats,
            } => {
                let request = CreateCourseRequest::new(&template, &start, seats)?;
                outcome(formatter, catalog.create_course(request).await?)
            }
            CoursesCommand::Update { bvin, price, start } => {
                let request = UpdateCourseRequest::new(&bvin, price, &start)?;
                Ok(Output::plain(
                    formatter.format_document(&catalog.update_course(request).await?)?,
                ))
            }
            CoursesCommand::Delete { bvin } => {
                outcome(formatter, catalog.delete_course(&Bvin::new(bvin)?).await?)
            }
        },
        Command::Inventory { action } => match action {
            InventoryCommand::Show { product_bvin } => outcome(
                formatter,
                catalog.get_inventory(&Bvin::new(product_bvin)?).await?,
            ),
            InventoryCommand::Resolve { product_bvin } => outcome(
                formatter,
                catalog
                    .resolve_inventory(&Bvin::new(product_bvin)?)
                    .await?,
            ),
            InventoryCommand::Set {
                inventory_bvin,
                quantity,
            } => Ok(Output::plain(formatter.format_document(
                &catalog
                    .update_inventory(&Bvin::new(inventory_bvin)?, quantity)
                    .await?,
            )?)),
        },
        Command::Settings { .. } | Command::Templates { .. } => {
            anyhow::bail!("local commands do not reach the platform")
        }
    }
}

fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))
}
