use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub async fn run(dir: &Path) -> Result<(), String> {
    let engine = super::open_game(dir).await?;
    let active = engine.active_story_id();
    let stories = engine.all_stories();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Title", "Chapters", "Active"]);

    for story in &stories {
        let chapters = engine
            .catalog()
            .get(&story.id)
            .map_or(0, |manifest| manifest.chapters.len());
        let marker = if active == Some(story.id.as_str()) {
            "*"
        } else {
            ""
        };
        table.add_row(vec![
            story.id.clone(),
            story.metadata.title.clone(),
            chapters.to_string(),
            marker.to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} {}",
        stories.len(),
        if stories.len() == 1 { "story" } else { "stories" }
    );

    Ok(())
}
