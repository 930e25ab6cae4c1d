pub mod play;
pub mod stories;

use std::path::Path;

use vn_engine::{CONFIG_FILE, DirSource, EngineConfig, StoryEngine};

/// Load a game directory's configuration and story catalog.
async fn open_game(dir: &Path) -> Result<StoryEngine<DirSource>, String> {
    if !dir.is_dir() {
        return Err(format!("{} is not a directory", dir.display()));
    }

    let source = DirSource::new(dir);
    let config = EngineConfig::load(&source)
        .await
        .map_err(|e| format!("failed to read {CONFIG_FILE}: {e}"))?;

    let mut engine = StoryEngine::new(source, config);
    engine
        .initialize()
        .await
        .map_err(|e| format!("failed to initialize the game: {e}"))?;
    Ok(engine)
}
