use crate::context::AppContext;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use vibe_application::CreateCommand;
use vibe_core::session::Session;

const UNTITLED: &str = "Untitled applet";

fn applet_name(session: &Session) -> &str {
    session
        .current_applet
        .as_ref()
        .map(|applet| applet.metadata.name.as_str())
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(UNTITLED)
}

fn write_code(session: &Session, out: Option<&Path>) -> Result<()> {
    let (Some(path), Some(applet)) = (out, session.current_applet.as_ref()) else {
        return Ok(());
    };
    fs::write(path, &applet.code)
        .with_context(|| format!("Failed to write applet to {}", path.display()))?;
    println!("  HTML written to {}", path.display());
    Ok(())
}

fn print_last_reply(session: &Session) {
    if let Some(entry) = session.conversation_log.last() {
        println!("  {}", entry.text);
    }
}

pub async fn generate(
    ctx: &AppContext,
    persona_id: String,
    template_id: String,
    content: Option<String>,
    name: Option<String>,
    out: Option<&Path>,
) -> Result<()> {
    let language = ctx.language();
    let content = match content {
        Some(content) => content,
        None => ctx
            .catalog()
            .await?
            .starter_content(&template_id, language)
            .unwrap_or_default()
            .to_string(),
    };

    let controller = ctx.controller()?;
    let session = controller
        .generate(CreateCommand {
            persona_id,
            template_id,
            content,
            language,
        })
        .await?;

    let name = name.unwrap_or_else(|| applet_name(&session).to_string());
    let id = controller.save(&name).await?;
    println!("✅ Generated \"{}\" (session {})", applet_name(&session), id);
    print_last_reply(&session);
    write_code(&session, out)
}

pub async fn refine(
    ctx: &AppContext,
    session_id: &str,
    change: &str,
    out: Option<&Path>,
) -> Result<()> {
    let controller = ctx.controller()?;
    let loaded = controller.load(session_id).await?;
    let name = loaded.name.unwrap_or_else(|| UNTITLED.to_string());

    let session = controller.refine(change).await?;
    controller.save(&name).await?;
    println!(
        "✅ Refined \"{}\" (generation {})",
        applet_name(&session),
        session.generation_count
    );
    print_last_reply(&session);
    write_code(&session, out)
}

pub async fn import(ctx: &AppContext, file: &Path, name: &str) -> Result<()> {
    let code = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let controller = ctx.controller()?;
    controller.load_external_code(&code).await?;
    let id = controller.save(name).await?;
    println!("✅ Imported {} as session {}", file.display(), id);
    Ok(())
}

pub async fn publish(ctx: &AppContext, session_id: &str) -> Result<()> {
    let controller = ctx.controller()?;
    let loaded = controller.load(session_id).await?;
    let name = loaded.name.unwrap_or_else(|| UNTITLED.to_string());

    let receipt = controller.publish().await?;
    controller.save(&name).await?;

    println!("🚀 Published \"{}\"", name);
    println!("  Link:       {}", receipt.long_url);
    println!("  Short link: {}", receipt.short_url);
    println!("  Gallery id: {}", receipt.entry_id);
    Ok(())
}

pub async fn list(ctx: &AppContext) -> Result<()> {
    let controller = ctx.controller()?;
    let sessions = controller.saved_sessions().await?;
    if sessions.is_empty() {
        println!("No saved sessions.");
    }
    for snapshot in &sessions {
        println!(
            "{}  {}  (generation {}, updated {})",
            snapshot.id.as_deref().unwrap_or("-"),
            snapshot.name,
            snapshot.generation_count,
            snapshot.updated_at
        );
    }
    Ok(())
}
