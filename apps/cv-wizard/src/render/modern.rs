//! Modern: light header with accent bar, career on the left, cards on the right.

use crate::models::field_path::FieldPath;
use crate::models::profile::CandidateProfile;

use super::html::{escape, photo, section_title, slot};
use super::{
    education_rows, experience_rows, headline_slot, languages_block, name_slot, qualities_block,
    skills_block, summary_slot, ExperienceStyle, RenderContext,
};

const STYLE: ExperienceStyle = ExperienceStyle {
    dates_in_gutter: false,
    show_achievements: true,
};

fn labelled(label: &str, value: String) -> String {
    format!(
        r#"<div class="labelled"><span class="label">{}</span>{value}</div>"#,
        escape(label)
    )
}

pub(super) fn render(profile: &CandidateProfile, ctx: &RenderContext<'_>) -> String {
    let header = format!(
        r#"<header class="header">{photo}<div class="identity">{name}<div class="accent"></div>{headline}</div></header>"#,
        photo = photo(&profile.profile_photo, "photo-frame"),
        name = name_slot(profile, ctx, ""),
        headline = headline_slot(profile, ctx, "headline"),
    );

    let main = format!(
        r#"<main class="main"><section><h2>Perfil</h2><div class="quote"><p>{summary}</p></div></section><section><h2>Jornada</h2><div class="entry-card">{experiences}</div></section></main>"#,
        summary = summary_slot(profile, ctx),
        experiences = experience_rows(profile, ctx, STYLE),
    );

    let contact_card = format!(
        r#"<section class="contact-card">{title}{email}{phone}{address}{place}</section>"#,
        title = section_title("Contato", "section-title"),
        email = labelled(
            "Email",
            slot(ctx, FieldPath::Email, &profile.email, "Email", "break-all")
        ),
        phone = labelled(
            "Telefone",
            slot(ctx, FieldPath::Phone, &profile.phone, "Telefone", "")
        ),
        address = labelled(
            "Morada",
            slot(ctx, FieldPath::Address, &profile.address, "Morada", "")
        ),
        place = labelled(
            "Local",
            format!(
                "{}<span>, </span>{}",
                slot(ctx, FieldPath::City, &profile.city, "Cidade", ""),
                slot(
                    ctx,
                    FieldPath::Nationality,
                    &profile.nationality,
                    "Nacionalidade",
                    ""
                ),
            )
        ),
    );

    let side = format!(
        r#"<aside class="side">{contact_card}{skills}<section>{education_title}{education}</section>{languages}{qualities}</aside>"#,
        skills = skills_block(profile, ctx, "Skills"),
        education_title = section_title("Educação", "section-title"),
        education = education_rows(profile, ctx),
        languages = languages_block(profile, ctx),
        qualities = qualities_block(profile, ctx),
    );

    format!(r#"{header}<div class="columns">{main}{side}</div>"#)
}
