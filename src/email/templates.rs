// src/email/templates.rs

use crate::email::OutboundEmail;
use crate::quiz::ResultProfile;
use crate::utils::html::escape_text;

fn greeting(name: Option<&str>) -> String {
    match name {
        // The name is visitor input headed into an HTML body; escape it.
        Some(name) if !name.trim().is_empty() => format!("Hi {},", escape_text(name.trim())),
        _ => "Hi,".to_string(),
    }
}

/// Renders the quiz-result email from an archetype's Result Profile.
pub fn quiz_result_email(to: &str, name: Option<&str>, profile: &ResultProfile) -> OutboundEmail {
    let paragraphs: String = profile
        .description
        .iter()
        .map(|p| format!("<p>{}</p>", p))
        .collect();

    let traits: String = profile
        .traits
        .iter()
        .map(|t| format!("<li>{}</li>", t))
        .collect();

    let html = format!(
        "<p>{greeting}</p>\
         <h1>{title}</h1>\
         <h2>{subtitle}</h2>\
         {paragraphs}\
         <h3>Sound familiar?</h3>\
         <ul>{traits}</ul>\
         <p><strong>Your next step:</strong> {next_action}</p>",
        greeting = greeting(name),
        title = profile.title,
        subtitle = profile.subtitle,
        paragraphs = paragraphs,
        traits = traits,
        next_action = profile.next_action,
    );

    OutboundEmail {
        to: to.to_string(),
        subject: format!("Your result: {}", profile.title),
        html,
    }
}

/// Renders the meditation-access email for meditation-download leads.
pub fn meditation_email(to: &str, name: Option<&str>, audio_url: &str) -> OutboundEmail {
    let html = format!(
        "<p>{greeting}</p>\
         <p>Your grounding meditation is ready. Find a quiet spot, put your \
         headphones on, and press play.</p>\
         <p><a href=\"{audio_url}\">Listen to your meditation</a></p>\
         <p>Come back to it as often as you need.</p>",
        greeting = greeting(name),
        audio_url = audio_url,
    );

    OutboundEmail {
        to: to.to_string(),
        subject: "Your meditation is ready".to_string(),
        html,
    }
}

/// Renders the admin magic-link email. The URL embeds the single-use token.
pub fn magic_link_email(to: &str, verify_url: &str) -> OutboundEmail {
    let html = format!(
        "<p>Click the link below to sign in to the admin dashboard. It \
         expires in 15 minutes and works exactly once.</p>\
         <p><a href=\"{url}\">Sign in</a></p>\
         <p>If you did not request this, you can ignore this email.</p>",
        url = verify_url,
    );

    OutboundEmail {
        to: to.to_string(),
        subject: "Your admin sign-in link".to_string(),
        html,
    }
}
