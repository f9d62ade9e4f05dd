use crate::infra::{parse_intent, InMemoryBuildRepository};
use build_advisor::advisor::{
    AdvisorService, AdvisorSettings, BuildItem, HeroId, RecommendationRequest,
};
use build_advisor::catalog::{CatalogImporter, CatalogItem};
use build_advisor::config::{parse_stage_list, AppConfig, EngineConfig};
use build_advisor::engine::{
    EngineOutput, IntentKey, IntentWeights, ItemCandidate, ScoreCategory, StagePipeline,
};
use build_advisor::error::AppError;
use clap::Args;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    /// Catalog export to rank (`.json`, anything else is read as CSV)
    #[arg(long)]
    pub(crate) catalog: PathBuf,
    /// Intent weights, e.g. `burst=1,tank=0.5`
    #[arg(long, value_parser = parse_intent)]
    pub(crate) intent: IntentWeights,
    /// Hero the recommendation is for
    #[arg(long, default_value = "cli_hero")]
    pub(crate) hero: String,
    /// Comma separated ids of items the hero already owns
    #[arg(long, value_delimiter = ',')]
    pub(crate) owned: Vec<String>,
    /// Comma separated stage list overriding the default pipeline
    #[arg(long)]
    pub(crate) stages: Option<String>,
    /// Show at most this many items
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Print the raw engine output as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print every scenario's engine output as JSON
    #[arg(long)]
    pub(crate) verbose: bool,
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let output = rank_catalog(&config.engine, &args)?;

    if args.json {
        print_json(&output)?;
    } else {
        println!("Recommendations from {}", args.catalog.display());
        render_output(&output);
    }

    Ok(())
}

/// Rank a catalog file using the configured engine with CLI overrides applied.
fn rank_catalog(engine: &EngineConfig, args: &RecommendArgs) -> Result<EngineOutput, AppError> {
    let mut engine = engine.clone();
    if let Some(stages) = args.stages.as_deref() {
        engine.stages = parse_stage_list(stages)?;
    }
    if args.limit.is_some() {
        engine.result_limit = args.limit;
    }

    let candidates = CatalogImporter::from_path(&args.catalog)?;
    let service =
        AdvisorService::from_config(Arc::new(InMemoryBuildRepository::default()), &engine);

    let mut request = RecommendationRequest::new(
        HeroId::new(args.hero.clone()),
        args.intent.clone(),
        candidates.into_iter().map(CatalogItem::from).collect(),
    );
    request.current_items = Some(args.owned.clone());

    Ok(service.recommend(request)?)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = AdvisorService::new(
        Arc::new(InMemoryBuildRepository::default()),
        StagePipeline::standard(),
        AdvisorSettings::default(),
    );
    let hero = HeroId::new("demo_hero");

    println!("Build advisor demo");
    println!(
        "Pipeline: {}",
        service.pipeline().stage_ids().join(" -> ")
    );

    for (title, intent) in demo_scenarios() {
        println!("\nScenario: {title}");
        let request = RecommendationRequest::new(hero.clone(), intent, demo_catalog());
        let output = service.recommend(request)?;
        render_output(&output);
        if args.verbose {
            print_json(&output)?;
        }
    }

    let build = service.add_item(
        &hero,
        BuildItem {
            id: "item_a".to_string(),
            name: "Burst Blade".to_string(),
        },
    )?;
    println!(
        "\nScenario: burst after buying {}",
        build.item_ids().join(", ")
    );
    let output = service.recommend(RecommendationRequest::new(
        hero.clone(),
        IntentWeights::single(IntentKey::Burst, 1.0),
        demo_catalog(),
    ))?;
    render_output(&output);
    service.clear_build(&hero)?;

    Ok(())
}

fn demo_scenarios() -> Vec<(&'static str, IntentWeights)> {
    let mut scenarios: Vec<(&'static str, IntentWeights)> = [
        ("pure burst", IntentKey::Burst),
        ("pure tank", IntentKey::Tank),
        ("pure sustain", IntentKey::Sustain),
        ("pure mobility", IntentKey::Mobility),
    ]
    .into_iter()
    .map(|(title, key)| (title, IntentWeights::single(key, 1.0)))
    .collect();

    let even: IntentWeights = IntentKey::ALL
        .into_iter()
        .map(|key| (key, 1.0 / IntentKey::ALL.len() as f64))
        .collect();
    scenarios.push(("even split", even));
    scenarios
}

fn demo_catalog() -> Vec<CatalogItem> {
    use ScoreCategory::*;

    vec![
        demo_item(
            "item_a",
            "Burst Blade",
            3000.0,
            &[(Damage, 80.0), (Survivability, 10.0), (Mobility, 5.0)],
            &["burst", "damage"],
        ),
        demo_item(
            "item_b",
            "Tank Shield",
            2800.0,
            &[(Damage, 10.0), (Survivability, 90.0)],
            &["tank", "armor"],
        ),
        demo_item(
            "item_c",
            "Balanced Boots",
            2500.0,
            &[
                (Damage, 40.0),
                (Survivability, 20.0),
                (Sustain, 20.0),
                (Mobility, 20.0),
            ],
            &["mobility", "speed"],
        ),
        demo_item(
            "item_d",
            "Lifedrain Pendant",
            3200.0,
            &[(Damage, 20.0), (Sustain, 95.0), (Utility, 10.0), (Economy, 5.0)],
            &["sustain", "lifesteal", "heal"],
        ),
    ]
}

fn demo_item(
    id: &str,
    name: &str,
    cost: f64,
    values: &[(ScoreCategory, f64)],
    tags: &[&str],
) -> CatalogItem {
    CatalogItem::from(ItemCandidate {
        item_id: id.to_string(),
        name: name.to_string(),
        cost,
        category_values: values.iter().copied().collect::<BTreeMap<_, _>>(),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
    })
}

fn render_output(output: &EngineOutput) {
    let intent: Vec<String> = output
        .normalized_intent
        .iter()
        .map(|(key, weight)| format!("{}={:.3}", key.label(), weight))
        .collect();
    println!("Normalized intent: {}", intent.join(", "));

    if output.recommendations.is_empty() {
        println!("- no candidates to rank");
        return;
    }

    for (position, entry) in output.recommendations.iter().enumerate() {
        println!(
            "{:>2}. {:<20} {:>8.3}  (cost {}, id {})",
            position + 1,
            entry.item.name,
            entry.final_score,
            entry.item.cost,
            entry.item.item_id
        );
        for reason in &entry.reasons {
            println!("      - {reason}");
        }
    }
}

fn print_json(output: &EngineOutput) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(output).map_err(std::io::Error::from)?;
    println!("{rendered}");
    Ok(())
}
