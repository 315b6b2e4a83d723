use crate::context::AppContext;
use anyhow::{Context, Result};
use vibe_core::gallery::{GalleryEntry, GalleryFilter, GalleryMetadataUpdate};

fn print_entry(entry: &GalleryEntry) {
    println!(
        "{}  {}  [{} / {}]  by {} ({})",
        entry.id.as_deref().unwrap_or("-"),
        entry.metadata.name,
        entry.metadata.domain,
        entry.metadata.target_level,
        entry.owner_name,
        entry.school_code
    );
    println!("    {}", entry.short_url);
}

pub async fn list(
    ctx: &AppContext,
    mine: bool,
    school_code: Option<String>,
    domain: Option<String>,
    limit: Option<usize>,
) -> Result<()> {
    let filter = GalleryFilter {
        owner_uid: if mine { Some(ctx.identity()?.uid) } else { None },
        school_code,
        domain,
        limit,
    };
    let entries = ctx.gallery.list(&filter).await?;
    if entries.is_empty() {
        println!("The gallery has no matching applets.");
    }
    for entry in &entries {
        print_entry(entry);
    }
    Ok(())
}

pub async fn last_link(ctx: &AppContext) -> Result<()> {
    let identity = ctx.identity()?;
    let entry = ctx
        .gallery
        .last_published(&identity)
        .await?
        .context("You have not published any applet yet")?;
    println!("{}", entry.metadata.name);
    println!("  Link:       {}", entry.app_url);
    println!("  Short link: {}", entry.short_url);
    if let Some(qr) = &entry.qr_code_data_url {
        println!("  QR code:    {}", qr);
    }
    Ok(())
}

pub async fn edit(ctx: &AppContext, id: &str, update: GalleryMetadataUpdate) -> Result<()> {
    let identity = ctx.identity()?;
    let entry = ctx.gallery.update_metadata(&identity, id, update).await?;
    println!("✅ Updated gallery entry:");
    print_entry(&entry);
    Ok(())
}

pub async fn delete(ctx: &AppContext, id: &str) -> Result<()> {
    let identity = ctx.identity()?;
    ctx.gallery.delete(&identity, id).await?;
    println!("🗑️  Deleted gallery entry {}", id);
    Ok(())
}
