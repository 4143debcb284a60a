//! Europass: dark-blue header band with photo, contacts sidebar, career column.

use crate::models::field_path::FieldPath;
use crate::models::profile::CandidateProfile;

use super::html::{escape, photo, section_title, slot};
use super::{
    contact_lines, education_rows, experience_rows, headline_slot, languages_block, name_slot,
    qualities_block, skills_block, summary_slot, ExperienceStyle, RenderContext,
};

const STYLE: ExperienceStyle = ExperienceStyle {
    dates_in_gutter: false,
    show_achievements: true,
};

fn heading(title: &str) -> String {
    format!("<h2>{}</h2>", escape(title))
}

pub(super) fn render(profile: &CandidateProfile, ctx: &RenderContext<'_>) -> String {
    let band = format!(
        r#"<header class="band">{photo}<div class="identity">{name}{headline}<div class="origin">{nationality}<span>•</span>{city}</div></div><div class="brand">Europass</div></header>"#,
        photo = photo(&profile.profile_photo, "photo-frame"),
        name = name_slot(profile, ctx, ""),
        headline = headline_slot(profile, ctx, "headline"),
        nationality = slot(
            ctx,
            FieldPath::Nationality,
            &profile.nationality,
            "Nacionalidade",
            ""
        ),
        city = slot(ctx, FieldPath::City, &profile.city, "Cidade", ""),
    );

    let sidebar = format!(
        r#"<aside class="sidebar"><section>{contacts_title}{contacts}</section>{skills}{languages}{qualities}</aside>"#,
        contacts_title = section_title("Contatos", "section-title"),
        contacts = contact_lines(profile, ctx),
        skills = skills_block(profile, ctx, "Habilidades"),
        languages = languages_block(profile, ctx),
        qualities = qualities_block(profile, ctx),
    );

    let main = format!(
        r#"<main class="main"><section>{profile_title}<p>{summary}</p></section><section>{experience_title}{experiences}</section><section>{education_title}{education}</section></main>"#,
        profile_title = heading("Perfil"),
        summary = summary_slot(profile, ctx),
        experience_title = heading("Experiência Profissional"),
        experiences = experience_rows(profile, ctx, STYLE),
        education_title = heading("Educação e Formação"),
        education = education_rows(profile, ctx),
    );

    format!(r#"{band}<div class="columns">{sidebar}{main}</div>"#)
}
