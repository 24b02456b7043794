//! Tag list refresh binary.

use taginfo_loader::{LogRateApplier, TagRegistry};
use taginfo_service::{FileTagListSource, RegistryReport, Settings, TracingConfigStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let settings = Settings::from_env()?;
    let source = FileTagListSource::new(&settings.export_path);

    tracing::info!("Loading tag list export from: {}", source.path().display());

    let registry = TagRegistry::with_config(settings.registry.clone());
    tracing::debug!(
        "Registry limits: {} bytes per line, tag ID span {}",
        registry.config().max_line_bytes,
        registry.config().max_id_span
    );
    let stats = registry.refresh(&source)?;

    if stats.gaps_corrected() {
        tracing::info!(
            "Tag IDs span {} numbers for {} tags; using offset-indexed layout",
            stats.id_span.unwrap_or_default() + 1,
            stats.tags_loaded
        );
    }

    let report = RegistryReport::from_registry(&registry)?;
    for count in &report.groups {
        tracing::info!("Group {}: {} tags", count.group, count.tags);
    }

    if settings.print_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    if let Some(update) = settings.log_update {
        let applier = LogRateApplier::with_config(settings.log_rate.clone());
        let mut store = TracingConfigStore::new();
        let written =
            applier.apply_to_group(&registry, &mut store, update.group, update.interval_secs)?;
        tracing::info!(
            "Dry run complete: {} tags in group {} would log every {}s",
            written,
            update.group,
            update.interval_secs
        );
    }

    Ok(())
}
