use crate::context::AppContext;
use anyhow::Result;
use vibe_core::auth::{TeacherProfile, normalize_email};

pub fn register(ctx: &AppContext, email: &str, school_code: Option<String>) -> Result<()> {
    let profile = TeacherProfile {
        email: normalize_email(email),
        school_code,
    };
    ctx.roster.register(profile.clone())?;
    println!(
        "✅ Registered {} (school {})",
        profile.email,
        profile.school_code()
    );
    Ok(())
}
