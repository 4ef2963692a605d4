use clap::{Parser, Subcommand};
use std::path::PathBuf;

use course_admin::application::dto::{OutputFormat, TransportKind};

/// Manage course products, stock and category links on a Hotcakes store
#[derive(Parser, Debug)]
#[command(name = "course-admin")]
#[command(version)]
#[command(about = "Manage course products, stock and category links on a Hotcakes store", long_about = None)]
pub struct Args {
    /// Config file (defaults to ./course-admin.config.yml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding settings.json, templates.json and inventoryMap.json
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Output format: json or markdown
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Platform transport: raw or standard (overrides the config file)
    #[arg(long, global = true)]
    pub transport: Option<TransportKind>,

    /// Log request details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Platform connection settings
    Settings {
        #[command(subcommand)]
        action: SettingsCommand,
    },
    /// List the catalog categories
    Categories,
    /// Course products in the default category
    Courses {
        #[command(subcommand)]
        action: CoursesCommand,
    },
    /// Stock records of courses
    Inventory {
        #[command(subcommand)]
        action: InventoryCommand,
    },
    /// Local course templates
    Templates {
        #[command(subcommand)]
        action: TemplatesCommand,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum SettingsCommand {
    /// Print the stored settings
    Show,
    /// Replace the stored settings
    Set {
        #[arg(long)]
        api_key: String,
        /// Site base URL, e.g. http://shop.example.com:8080/
        #[arg(long)]
        base_url: String,
        /// Default category id for new and listed courses
        #[arg(long)]
        category: Option<String>,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum CoursesCommand {
    /// List courses in the default category
    List {
        /// Also read the stock of every course
        #[arg(long)]
        with_stock: bool,
    },
    /// Print one product record
    Show { bvin: String },
    /// Create product, stock record and category link from a template
    Create {
        #[arg(long, value_name = "ID")]
        template: String,
        /// Start as YYYY-MM-DDTHH:MM
        #[arg(long, value_name = "START")]
        start: String,
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        seats: u32,
    },
    /// Move a course to a new start and price
    Update {
        bvin: String,
        #[arg(long)]
        price: f64,
        /// Start as YYYY-MM-DDTHH:MM
        #[arg(long, value_name = "START")]
        start: String,
    },
    /// Delete a course and its cached stock link
    Delete { bvin: String },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum InventoryCommand {
    /// Print the stock record of a product
    Show { product_bvin: String },
    /// Look up and cache the stock record id of a product
    Resolve { product_bvin: String },
    /// Set the quantity on hand of a stock record
    Set {
        inventory_bvin: String,
        #[arg(long)]
        quantity: u32,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum TemplatesCommand {
    List,
    Show { template_id: String },
    /// Add a template from a JSON file, replacing one with the same id
    Add {
        #[arg(long, value_name = "FILE")]
        file: PathBuf,
    },
    Remove { template_id: String },
    /// Replace all templates with a JSON array from a file
    Replace {
        #[arg(long, value_name = "FILE")]
        file: PathBuf,
    },
}

impl Args {
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}
