//! Command-line front end for the estimate wizard.
//!
//! Each invocation opens the durable session slot, applies one wizard action
//! (which is persisted immediately), or talks to the estimate/catalog API.
//! Step gating — investor name and address before leaving step 0 — lives
//! here, not in the store.

mod logging;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;

use estimate_client::{HttpClient, JsonFileStorage};
use estimate_core::api::{CatalogApi, EstimateApi, PdfDetail};
use estimate_core::model::{
    BasicInfoPatch, ItemId, MaterialConsumption, WorkItemEntry, WorkItemPatch,
};
use estimate_core::session::{PersistentSession, SessionStorage, StorageError};

#[derive(Parser)]
#[command(
    name = "estimate",
    version,
    about = "Multi-step builder for renovation cost estimates"
)]
struct Cli {
    /// Path of the session slot file (defaults to the platform data dir).
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,

    /// Base URL of the estimate/catalog API.
    #[arg(
        long,
        global = true,
        env = "ESTIMATE_API_URL",
        default_value = "http://localhost:8080"
    )]
    api_url: String,

    /// Bearer token for the estimate API.
    #[arg(long, global = true, env = "ESTIMATE_API_TOKEN")]
    api_token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the current draft, step, and cost breakdown
    Show,
    /// Set investor/contractor fields (only the flags given are changed)
    Basic(BasicArgs),
    /// List catalog works
    Works {
        #[arg(long)]
        category: Option<String>,
    },
    /// List renovation templates
    Templates {
        #[arg(long)]
        category: Option<String>,
    },
    /// List scraped market prices, for sanity-checking entered prices
    Prices {
        #[command(subcommand)]
        kind: PriceKind,
    },
    /// Add a catalog work to the draft
    AddWork {
        work_id: String,
        #[arg(long, default_value = "1")]
        quantity: Decimal,
    },
    /// Add every work of a renovation template to the draft
    AddTemplate { template_id: String },
    /// Add a free-form work item
    AddCustom {
        name: String,
        #[arg(long)]
        unit: String,
        #[arg(long, default_value = "1")]
        quantity: Decimal,
        #[arg(long)]
        labor_price: Decimal,
        /// Material as name:unit:consumption:price, repeatable
        #[arg(long = "material", value_parser = parse_material_spec)]
        materials: Vec<MaterialConsumption>,
    },
    /// Update fields of a draft item by its id
    UpdateItem {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        unit: Option<String>,
        #[arg(long)]
        quantity: Option<Decimal>,
        #[arg(long)]
        labor_price: Option<Decimal>,
    },
    /// Remove a draft item by its id
    RemoveItem { id: u64 },
    /// Set both discount percentages (omitted flags keep their current value)
    Discounts {
        #[arg(long)]
        material: Option<Decimal>,
        #[arg(long)]
        labor: Option<Decimal>,
    },
    /// Set the validity and start dates (omitted flags keep their current value)
    Dates {
        #[arg(long)]
        valid_until: Option<String>,
        #[arg(long)]
        start_date: Option<String>,
    },
    /// Set the free-text notes
    Notes { text: String },
    /// Move between wizard steps
    Step {
        #[command(subcommand)]
        action: StepAction,
    },
    /// Discard the draft and start over
    Reset,
    /// Submit the draft to the estimate API and reset on success
    Submit,
    /// List persisted estimates
    List,
    /// Delete a persisted estimate
    Delete { id: String },
    /// Download the PDF of a persisted estimate
    Pdf {
        id: String,
        #[arg(long, value_enum, default_value_t = DetailArg::Full)]
        detail: DetailArg,
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum PriceKind {
    /// Material unit prices
    Materials,
    /// Labor rates per work type
    Labor,
}

#[derive(Subcommand)]
enum StepAction {
    /// Advance one step
    Next,
    /// Go back one step
    Back,
    /// Jump to a step number (0-based)
    Goto { step: usize },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DetailArg {
    Full,
    Basic,
}

impl From<DetailArg> for PdfDetail {
    fn from(value: DetailArg) -> Self {
        match value {
            DetailArg::Full => PdfDetail::Full,
            DetailArg::Basic => PdfDetail::Basic,
        }
    }
}

#[derive(Args)]
struct BasicArgs {
    #[arg(long)]
    investor_name: Option<String>,
    #[arg(long)]
    investor_address: Option<String>,
    #[arg(long)]
    contractor_name: Option<String>,
    #[arg(long)]
    contractor_address: Option<String>,
    #[arg(long)]
    contractor_phone: Option<String>,
    #[arg(long)]
    contractor_email: Option<String>,
}

/// Parses `name:unit:consumption:price` into a material line.
fn parse_material_spec(spec: &str) -> Result<MaterialConsumption, String> {
    let parts: Vec<&str> = spec.split(':').collect();
    let [name, unit, consumption, price] = parts.as_slice() else {
        return Err(format!(
            "expected name:unit:consumption:price, got '{spec}'"
        ));
    };
    if name.is_empty() {
        return Err("material name must not be empty".to_string());
    }
    let consumption: Decimal = consumption
        .parse()
        .map_err(|e| format!("invalid consumption '{consumption}': {e}"))?;
    let price: Decimal = price
        .parse()
        .map_err(|e| format!("invalid price '{price}': {e}"))?;
    Ok(MaterialConsumption::new(*name, *unit, consumption, price))
}

fn region_suffix(region: Option<&str>) -> String {
    match region {
        Some(region) => format!(" ({region})"),
        None => String::new(),
    }
}

fn storage(cli: &Cli) -> Result<JsonFileStorage> {
    let path = match &cli.session_file {
        Some(path) => path.clone(),
        None => JsonFileStorage::default_path()
            .context("cannot determine a session file path; pass --session-file")?,
    };
    Ok(JsonFileStorage::new(path))
}

/// Opens the wizard session, discarding a corrupt slot with a warning rather
/// than leaving the user stuck.
fn open_session(storage: &JsonFileStorage) -> Result<PersistentSession<&JsonFileStorage>> {
    match PersistentSession::open(storage) {
        Ok(session) => Ok(session),
        Err(StorageError::Corrupt(message)) => {
            tracing::warn!(%message, "discarding corrupt session slot");
            storage.clear()?;
            Ok(PersistentSession::open(storage)?)
        }
        Err(e) => Err(e.into()),
    }
}

fn client(cli: &Cli) -> HttpClient {
    let client = HttpClient::new(cli.api_url.clone());
    match &cli.api_token {
        Some(token) => client.with_token(token.clone()),
        None => client,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init()?;
    let cli = Cli::parse();
    let storage = storage(&cli)?;
    let mut wizard = open_session(&storage)?;

    match &cli.command {
        Command::Show => render::print_session(wizard.session()),

        Command::Basic(args) => {
            wizard.update(|s| {
                s.set_basic_info(BasicInfoPatch {
                    investor_name: args.investor_name.clone(),
                    investor_address: args.investor_address.clone(),
                    contractor_name: args.contractor_name.clone(),
                    contractor_address: args.contractor_address.clone(),
                    contractor_phone: args.contractor_phone.clone(),
                    contractor_email: args.contractor_email.clone(),
                });
            })?;
            println!("basic info updated");
        }

        Command::Works { category } => {
            let works = match category {
                Some(category) => client(&cli).works_by_category(category).await?,
                None => client(&cli).list_works().await?,
            };
            for work in &works {
                println!(
                    "{}  {} [{}], {} per {}",
                    work.id,
                    work.name,
                    work.category,
                    render::format_money(work.default_labor_price),
                    work.unit
                );
            }
        }

        Command::Templates { category } => {
            let templates = match category {
                Some(category) => client(&cli).templates_by_category(category).await?,
                None => client(&cli).list_templates().await?,
            };
            for template in &templates {
                println!(
                    "{}  {} [{}], {} works",
                    template.id,
                    template.name,
                    template.category,
                    template.work_ids.len()
                );
            }
        }

        Command::Prices { kind } => match kind {
            PriceKind::Materials => {
                for price in client(&cli).material_prices().await? {
                    println!(
                        "{}  {} per {}: {} / {} / {}{}",
                        price.id,
                        price.material_name,
                        price.unit,
                        render::format_money(price.price_min),
                        render::format_money(price.price_avg),
                        render::format_money(price.price_max),
                        region_suffix(price.region.as_deref())
                    );
                }
            }
            PriceKind::Labor => {
                for price in client(&cli).labor_prices().await? {
                    println!(
                        "{}  {} per {}: {} / {} / {}{}",
                        price.id,
                        price.work_type,
                        price.unit,
                        render::format_money(price.price_min),
                        render::format_money(price.price_avg),
                        render::format_money(price.price_max),
                        region_suffix(price.region.as_deref())
                    );
                }
            }
        },

        Command::AddWork { work_id, quantity } => {
            let works = client(&cli).list_works().await?;
            let work = works
                .iter()
                .find(|w| &w.id == work_id)
                .with_context(|| format!("no catalog work with id '{work_id}'"))?;
            let id = wizard.update(|s| s.add_work_item(WorkItemEntry::from_work(work, *quantity)))?;
            println!("added {} as item {id}", work.name);
        }

        Command::AddTemplate { template_id } => {
            let api = client(&cli);
            let templates = api.list_templates().await?;
            let template = templates
                .iter()
                .find(|t| &t.id == template_id)
                .with_context(|| format!("no template with id '{template_id}'"))?;
            let works = api.list_works().await?;
            let mut added = 0usize;
            for work_id in &template.work_ids {
                // Works removed from the catalog since the template was made
                // are skipped, matching the original wizard's behavior.
                if let Some(work) = works.iter().find(|w| &w.id == work_id) {
                    wizard
                        .update(|s| s.add_work_item(WorkItemEntry::from_work(work, Decimal::ONE)))?;
                    added += 1;
                } else {
                    tracing::warn!(%work_id, "template references a missing catalog work");
                }
            }
            println!("added {added} items from template {}", template.name);
        }

        Command::AddCustom {
            name,
            unit,
            quantity,
            labor_price,
            materials,
        } => {
            let entry = WorkItemEntry::new(
                name.clone(),
                unit.clone(),
                *quantity,
                *labor_price,
                materials.clone(),
            );
            let id = wizard.update(|s| s.add_work_item(entry))?;
            println!("added {name} as item {id}");
        }

        Command::UpdateItem {
            id,
            name,
            unit,
            quantity,
            labor_price,
        } => {
            let patch = WorkItemPatch {
                work_name: name.clone(),
                unit: unit.clone(),
                quantity: *quantity,
                labor_price_per_unit: *labor_price,
                materials: None,
            };
            let updated = wizard.update(|s| s.update_work_item(ItemId(*id), patch))?;
            if !updated {
                bail!("no draft item with id #{id}");
            }
            println!("item #{id} updated");
        }

        Command::RemoveItem { id } => {
            let removed = wizard.update(|s| s.remove_work_item(ItemId(*id)))?;
            if !removed {
                bail!("no draft item with id #{id}");
            }
            println!("item #{id} removed");
        }

        Command::Discounts { material, labor } => {
            wizard.update(|s| {
                let material = material.unwrap_or(s.draft().material_discount_pct);
                let labor = labor.unwrap_or(s.draft().labor_discount_pct);
                s.set_discounts(material, labor);
            })?;
            let draft = wizard.session().draft();
            println!(
                "discounts: materials {}%, labor {}%",
                draft.material_discount_pct, draft.labor_discount_pct
            );
        }

        Command::Dates {
            valid_until,
            start_date,
        } => {
            wizard.update(|s| {
                let valid_until = valid_until.clone().unwrap_or(s.draft().valid_until.clone());
                let start_date = start_date.clone().unwrap_or(s.draft().start_date.clone());
                s.set_dates(valid_until, start_date);
            })?;
            println!("dates updated");
        }

        Command::Notes { text } => {
            wizard.update(|s| s.set_notes(text.clone()))?;
            println!("notes updated");
        }

        Command::Step { action } => {
            match action {
                StepAction::Next => {
                    let draft = wizard.session().draft();
                    if wizard.session().current_step() == 0
                        && (draft.investor_name.is_empty() || draft.investor_address.is_empty())
                    {
                        bail!("fill in investor name and address before moving on");
                    }
                    wizard.update(|s| s.step_forward())?;
                }
                StepAction::Back => wizard.update(|s| s.step_back())?,
                StepAction::Goto { step } => wizard.update(|s| s.set_current_step(*step))?,
            }
            let step = wizard.session().current_step();
            println!("step {}: {}", step, render::STEP_NAMES[step]);
        }

        Command::Reset => {
            wizard.clear()?;
            println!("draft discarded");
        }

        Command::Submit => {
            let request = wizard.session().submission_request();
            if request.investor_name.is_empty() || request.investor_address.is_empty() {
                bail!("investor name and address are required before submitting");
            }
            if request.work_items.is_empty() {
                bail!("the draft has no work items");
            }

            let local = wizard.session().cost_breakdown();
            let estimate = client(&cli).create_estimate(request).await?;

            // The server derives the same totals independently; a mismatch
            // means the two sides disagree on pricing and must not go unseen.
            if estimate.material_cost != local.material_cost
                || estimate.labor_cost != local.labor_cost
                || estimate.material_cost_with_discount != local.material_cost_with_discount
                || estimate.labor_cost_with_discount != local.labor_cost_with_discount
                || estimate.total_cost != local.total_cost
            {
                bail!(
                    "server totals diverge from the draft (estimate {} persisted): \
                     server total {}, local total {}",
                    estimate.id,
                    estimate.total_cost,
                    local.total_cost
                );
            }

            println!(
                "estimate {} created, total {}",
                estimate.id,
                render::format_money(estimate.total_cost)
            );
            wizard.clear()?;
        }

        Command::List => {
            for estimate in client(&cli).list_estimates().await? {
                println!(
                    "{}  {}  {}  {}",
                    estimate.id,
                    estimate.created_at.format("%Y-%m-%d"),
                    estimate.investor_name,
                    render::format_money(estimate.total_cost)
                );
            }
        }

        Command::Delete { id } => {
            client(&cli).delete_estimate(id).await?;
            println!("estimate {id} deleted");
        }

        Command::Pdf { id, detail, output } => {
            let detail = PdfDetail::from(*detail);
            let bytes = client(&cli).estimate_pdf(id, detail).await?;
            let path = output.clone().unwrap_or_else(|| {
                PathBuf::from(format!("estimate-{id}-{}.pdf", detail.as_query_value()))
            });
            std::fs::write(&path, &bytes)
                .with_context(|| format!("cannot write {}", path.display()))?;
            println!("wrote {} ({} bytes)", path.display(), bytes.len());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn material_spec_parses_all_four_fields() {
        let mat = parse_material_spec("plaster:kg:1.5:40").unwrap();

        assert_eq!(mat.material_name, "plaster");
        assert_eq!(mat.unit, "kg");
        assert_eq!(mat.consumption_per_work_unit, dec!(1.5));
        assert_eq!(mat.price_per_unit, dec!(40));
    }

    #[test]
    fn material_spec_rejects_wrong_arity() {
        assert!(parse_material_spec("plaster:kg:1.5").is_err());
        assert!(parse_material_spec("plaster:kg:1.5:40:extra").is_err());
    }

    #[test]
    fn material_spec_rejects_bad_numbers() {
        assert!(parse_material_spec("plaster:kg:much:40").is_err());
        assert!(parse_material_spec(":kg:1:40").is_err());
    }

    #[test]
    fn material_spec_clamps_negative_values() {
        let mat = parse_material_spec("plaster:kg:-1:-2").unwrap();

        assert_eq!(mat.consumption_per_work_unit, Decimal::ZERO);
        assert_eq!(mat.price_per_unit, Decimal::ZERO);
    }
}
