use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use de9c_form::{
    DEFAULT_SETTINGS_FILE, FillOptions, FillSummary, FormFields, FormPage, Quarter, ReturnHeader,
    Settings, Signer,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "de9c", about = "Fill DE 9C wage reports from payroll CSV", version)]
struct Cli {
    /// Defaults file (remembered values from the last successful run)
    #[arg(long, global = true, default_value = DEFAULT_SETTINGS_FILE)]
    defaults: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill the DE 9C template from a payroll CSV
    Fill {
        /// Payroll CSV (SSN, First Name, Middle Name, Last Name,
        /// Total Subject Wages, PIT Wages, PIT Withheld)
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Blank DE 9C template PDF
        #[arg(long)]
        template: Option<PathBuf>,

        /// Output PDF file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Tax year, e.g. 2024
        #[arg(long)]
        year: Option<String>,

        /// Quarter (1-4)
        #[arg(long)]
        quarter: Option<String>,

        /// Employer account number
        #[arg(long)]
        account: Option<String>,

        /// Quarter ended date (mm/dd/yy); computed when omitted
        #[arg(long)]
        quarter_end: Option<String>,

        /// Signer name
        #[arg(long)]
        signer_name: Option<String>,

        /// Signer title
        #[arg(long)]
        signer_title: Option<String>,

        /// Signer phone number
        #[arg(long)]
        signer_phone: Option<String>,

        /// Signature date (mm/dd/yy); today when omitted
        #[arg(long)]
        signer_date: Option<String>,

        /// Don't remember these values for the next run
        #[arg(long)]
        no_save: bool,

        /// Show totals only, don't generate PDF
        #[arg(long)]
        summary_only: bool,
    },

    /// List the fields of a template and any the filler expects but can't find
    Fields {
        /// Template PDF
        #[arg(long)]
        template: PathBuf,
    },

    /// Print the defaults used for the next run
    Defaults,
}

/// Values the user entered, before validation
struct FillInput {
    year: String,
    quarter: String,
    account: String,
    quarter_end: Option<String>,
    signer: Signer,
}

impl FillInput {
    fn to_options(&self) -> Result<FillOptions> {
        let year = de9c_form::parse_year(&self.year)?;
        let quarter = Quarter::parse(&self.quarter)?;
        let mut header = ReturnHeader::new(year, quarter, self.account.trim())?;
        if let Some(quarter_end) = self.quarter_end.as_deref().map(str::trim) {
            if !quarter_end.is_empty() {
                header = header.with_quarter_end(quarter_end);
            }
        }

        let options = FillOptions {
            header,
            signer: self.signer.clone(),
        };
        options.validate()?;
        Ok(options)
    }

    fn to_settings(&self) -> Settings {
        Settings {
            year: self.year.clone(),
            quarter: self.quarter.clone(),
            employer_account: self.account.clone(),
            signature_name: self.signer.name.clone(),
            signature_title: self.signer.title.clone(),
            signature_phone: self.signer.phone.clone(),
        }
    }
}

/// Files a fill run reads and writes
struct FillPaths {
    csv: PathBuf,
    template: PathBuf,
    output: PathBuf,
}

/// Fill the return, then remember the entered values unless `no_save`.
/// Defaults are written only after the PDF is saved; failing to write them
/// is logged and does not fail the run.
fn run_fill(
    input: &FillInput,
    paths: &FillPaths,
    defaults: &Path,
    no_save: bool,
) -> Result<FillSummary> {
    let options = input.to_options()?;

    let summary = de9c_form::fill_return(&paths.csv, &paths.template, &paths.output, &options)
        .with_context(|| format!("Failed to fill {}", paths.output.display()))?;

    if !no_save {
        if let Err(e) = input.to_settings().save(defaults) {
            log::warn!("Could not save defaults to {}: {e}", defaults.display());
        }
    }

    Ok(summary)
}

/// Totals for the CSV alone; no PDF and no defaults are written
fn summarize(input: &FillInput, csv: &Path) -> Result<FillSummary> {
    input.to_options()?;

    let employees = de9c_form::load_employees(csv)?;
    let pages = de9c_form::paginate(&employees);
    Ok(FillSummary {
        employees: employees.len(),
        pages: pages.len(),
        page_totals: pages.iter().map(|page| page.totals).collect(),
        grand_totals: de9c_form::grand_totals(&pages),
        missing_fields: Vec::new(),
    })
}

fn required(path: Option<PathBuf>, what: &str) -> Result<PathBuf> {
    match path {
        Some(path) => Ok(path),
        None => bail!("Please select {what}."),
    }
}

fn print_summary(summary: &FillSummary) {
    println!("DE 9C Summary:");
    println!("  Employees: {}", summary.employees);
    println!("  Pages: {}", summary.pages);
    for (i, totals) in summary.page_totals.iter().enumerate() {
        println!("  Page {}: {}", i + 1, totals);
    }
    println!("  Grand total: {}", summary.grand_totals);
    if !summary.missing_fields.is_empty() {
        println!(
            "  Template fields not found (skipped): {}",
            summary.missing_fields.join(", ")
        );
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let settings = Settings::load_or_default(&cli.defaults);

    match cli.command {
        Commands::Fill {
            csv,
            template,
            output,
            year,
            quarter,
            account,
            quarter_end,
            signer_name,
            signer_title,
            signer_phone,
            signer_date,
            no_save,
            summary_only,
        } => {
            let csv = required(csv, "a CSV file")?;

            let input = FillInput {
                year: year.unwrap_or(settings.year),
                quarter: quarter.unwrap_or(settings.quarter),
                account: account.unwrap_or(settings.employer_account),
                quarter_end,
                signer: Signer {
                    name: signer_name.unwrap_or(settings.signature_name),
                    title: signer_title.unwrap_or(settings.signature_title),
                    phone: signer_phone.unwrap_or(settings.signature_phone),
                    date: signer_date.unwrap_or_else(de9c_form::today),
                },
            };

            if summary_only {
                print_summary(&summarize(&input, &csv)?);
                return Ok(());
            }

            let paths = FillPaths {
                csv,
                template: required(template, "a DE 9C template PDF")?,
                output: required(output, "an output PDF file")?,
            };
            let summary = run_fill(&input, &paths, &cli.defaults, no_save)?;
            print_summary(&summary);
            println!("DE 9C PDF created: {}", paths.output.display());
        }

        Commands::Fields { template } => {
            let doc = de9c_form::load_template(&template)?;
            let page = FormPage::from_template(&doc)?;

            println!("Template fields ({}):", page.field_names().len());
            for name in page.field_names() {
                println!("  {name}");
            }

            let missing = de9c_form::missing_contract_fields(&page);
            if missing.is_empty() {
                println!("All expected fields present");
            } else {
                println!("Expected but missing ({}):", missing.len());
                for name in missing {
                    println!("  {name}");
                }
            }
        }

        Commands::Defaults => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
    }

    Ok(())
}
