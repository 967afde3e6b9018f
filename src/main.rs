use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use gardenkit::designer::persistence::load_or_seed;
use gardenkit::{
    init_logging, spawn_autosave, EditorConfig, EventBus, JsonFileProvider, PersistenceProvider,
    WorkspaceStore, BUILD_DATE, VERSION,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;
    tracing::info!("GardenKit {} (built {})", VERSION, BUILD_DATE);

    let config_path = EditorConfig::default_path().context("Failed to resolve config path")?;
    let config = EditorConfig::load_or_default(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;
    let tenant = std::env::args().nth(1).unwrap_or_else(|| config.tenant.clone());

    let provider: Arc<dyn PersistenceProvider> =
        Arc::new(JsonFileProvider::default_location().context("No storage directory")?);
    let data = load_or_seed(provider.as_ref(), &tenant);

    let events = Arc::new(EventBus::new());
    let (autosave, worker) = spawn_autosave(
        provider.clone(),
        tenant.clone(),
        Duration::from_millis(config.persist_debounce_ms),
        events.clone(),
    );
    let store = WorkspaceStore::new(data, &config, events).with_sink(autosave);

    println!("Workspace for tenant '{}': {}", tenant, store.display_name());
    for garden in store.gardens() {
        println!("  {}", garden.name);
        for layout in store.layouts_of(&garden.id) {
            let items = store.doc_of(&layout.id).map_or(0, |d| d.items.len());
            let published = if layout.published { " (published)" } else { "" };
            println!("    {} - {} items{}", layout.name, items, published);
        }
    }

    // a freshly seeded workspace is written out once before exiting
    if provider.load(&tenant).ok().flatten().is_none() {
        provider
            .save(&tenant, &store.snapshot())
            .context("Failed to save seeded workspace")?;
    }

    drop(store);
    worker.await.context("Autosave worker failed")?;
    Ok(())
}
