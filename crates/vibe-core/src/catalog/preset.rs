//! Default catalog presets.
//!
//! System-defined personas and activity templates available to every teacher.

use super::model::{ActivityTemplate, Catalog, LocalizedText, Persona};

fn text(en: &str, he: &str) -> LocalizedText {
    LocalizedText::new(en, he)
}

/// Returns the built-in personas.
///
/// - **encouraging-coach**: warm, celebrates progress
/// - **socratic-guide**: leads with questions
/// - **game-designer**: turns material into challenges with points and levels
pub fn default_personas() -> Vec<Persona> {
    vec![
        Persona {
            id: "encouraging-coach".to_string(),
            icon: "fas fa-heart".to_string(),
            title: text("Encouraging Coach", "מאמן מעודד"),
            description: text(
                "Warm and positive, celebrates every step.",
                "חם וחיובי, חוגג כל צעד.",
            ),
            system_prompt: text(
                "You are a warm, encouraging teacher. Use simple language, give positive feedback after every answer, and turn mistakes into gentle hints.",
                "אתה מורה חם ומעודד. השתמש בשפה פשוטה, תן משוב חיובי אחרי כל תשובה, והפוך טעויות לרמזים עדינים.",
            ),
        },
        Persona {
            id: "socratic-guide".to_string(),
            icon: "fas fa-question".to_string(),
            title: text("Socratic Guide", "מדריך סוקרטי"),
            description: text(
                "Leads students to answers through questions.",
                "מוביל את התלמידים לתשובות באמצעות שאלות.",
            ),
            system_prompt: text(
                "You are a Socratic teacher. Never give the answer directly; guide the student with a sequence of questions and reveal explanations only after an attempt.",
                "אתה מורה סוקרטי. לעולם אל תיתן את התשובה ישירות; הנחה את התלמיד ברצף שאלות וחשוף הסברים רק אחרי ניסיון.",
            ),
        },
        Persona {
            id: "game-designer".to_string(),
            icon: "fas fa-gamepad".to_string(),
            title: text("Game Designer", "מעצב משחקים"),
            description: text(
                "Turns material into challenges with points and levels.",
                "הופך חומר לימוד לאתגרים עם נקודות ושלבים.",
            ),
            system_prompt: text(
                "You are a teacher who designs learning games. Use points, levels, timers and playful visuals while keeping the learning goal central.",
                "אתה מורה שמעצב משחקי למידה. השתמש בנקודות, שלבים, טיימרים ועיצוב משחקי תוך שמירה על מטרת הלמידה במרכז.",
            ),
        },
    ]
}

/// Returns the built-in activity templates.
pub fn default_templates() -> Vec<ActivityTemplate> {
    vec![
        ActivityTemplate {
            id: "quiz".to_string(),
            icon: "fas fa-list-check".to_string(),
            title: text("Multiple-Choice Quiz", "בוחן אמריקאי"),
            description: text(
                "Questions with instant feedback and a final score.",
                "שאלות עם משוב מיידי וציון סופי.",
            ),
            instructions: text(
                "Create a multiple-choice quiz. Show one question at a time, give immediate feedback on each answer, and display a final score with a restart button.",
                "צור בוחן רב-ברירה. הצג שאלה אחת בכל פעם, תן משוב מיידי על כל תשובה, והצג ציון סופי עם כפתור התחלה מחדש.",
            ),
            starter_content: text(
                "A 10-question quiz on ",
                "בוחן של 10 שאלות בנושא ",
            ),
        },
        ActivityTemplate {
            id: "memory-game".to_string(),
            icon: "fas fa-clone".to_string(),
            title: text("Memory Game", "משחק זיכרון"),
            description: text(
                "Match pairs of cards that belong together.",
                "התאמת זוגות של קלפים שקשורים זה לזה.",
            ),
            instructions: text(
                "Create a memory card game. Cards are shuffled face down; flipping two matching cards keeps them open. Count moves and celebrate when all pairs are found.",
                "צור משחק זיכרון. הקלפים מעורבבים והפוכים; הפיכת שני קלפים תואמים משאירה אותם גלויים. ספור מהלכים וחגוג כשכל הזוגות נמצאו.",
            ),
            starter_content: text(
                "Match each term with its definition: ",
                "התאם כל מושג להגדרה שלו: ",
            ),
        },
        ActivityTemplate {
            id: "simulation".to_string(),
            icon: "fas fa-flask".to_string(),
            title: text("Interactive Simulation", "סימולציה אינטראקטיבית"),
            description: text(
                "Sliders and controls that show a concept in motion.",
                "מחוונים ופקדים שמדגימים רעיון בתנועה.",
            ),
            instructions: text(
                "Create an interactive simulation with sliders or buttons that change parameters and immediately update a visual model, plus a short guided task.",
                "צור סימולציה אינטראקטיבית עם מחוונים או כפתורים שמשנים פרמטרים ומעדכנים מיד מודל חזותי, בתוספת משימה מונחית קצרה.",
            ),
            starter_content: text(
                "A simulation that shows how ",
                "סימולציה שמראה איך ",
            ),
        },
    ]
}

/// The built-in catalog.
pub fn default_catalog() -> Catalog {
    Catalog {
        personas: default_personas(),
        templates: default_templates(),
    }
}
