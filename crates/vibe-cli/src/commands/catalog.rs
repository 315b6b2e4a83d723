use crate::context::AppContext;
use anyhow::Result;

pub async fn list(ctx: &AppContext) -> Result<()> {
    let catalog = ctx.catalog().await?;
    let language = ctx.language();

    println!("Personas:");
    for persona in &catalog.personas {
        println!(
            "  {:<20} {} - {}",
            persona.id,
            persona.title.get(language),
            persona.description.get(language)
        );
    }

    println!("\nActivity templates:");
    for template in &catalog.templates {
        println!(
            "  {:<20} {} - {}",
            template.id,
            template.title.get(language),
            template.description.get(language)
        );
    }

    Ok(())
}
