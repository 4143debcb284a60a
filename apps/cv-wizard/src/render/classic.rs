//! Classic: light sidebar on the left, name and career on the right.

use crate::models::profile::CandidateProfile;

use super::html::{photo, section_title, slot};
use super::{
    contact_lines, education_rows, experience_rows, headline_slot, languages_block, name_slot,
    qualities_block, skills_block, summary_slot, ExperienceStyle, RenderContext,
};
use crate::models::field_path::FieldPath;

const STYLE: ExperienceStyle = ExperienceStyle {
    dates_in_gutter: true,
    show_achievements: false,
};

pub(super) fn render(profile: &CandidateProfile, ctx: &RenderContext<'_>) -> String {
    let sidebar = format!(
        r#"<aside class="sidebar">{photo}<section>{contacts_title}{contacts}{city}</section>{skills}{languages}{qualities}</aside>"#,
        photo = photo(&profile.profile_photo, "photo-frame"),
        contacts_title = section_title("Contatos", "section-title"),
        contacts = contact_lines(profile, ctx),
        city = slot(ctx, FieldPath::City, &profile.city, "Cidade", "city"),
        skills = skills_block(profile, ctx, "Habilidades"),
        languages = languages_block(profile, ctx),
        qualities = qualities_block(profile, ctx),
    );

    let main = format!(
        r#"<main class="main"><header class="header">{name}{headline}</header><section>{summary_title}<p>{summary}</p></section><section>{experience_title}{experiences}</section><section>{education_title}{education}</section></main>"#,
        name = name_slot(profile, ctx, ""),
        headline = headline_slot(profile, ctx, "headline"),
        summary_title = section_title("Resumo", "section-title"),
        summary = summary_slot(profile, ctx),
        experience_title = section_title("Experiência", "section-title"),
        experiences = experience_rows(profile, ctx, STYLE),
        education_title = section_title("Formação", "section-title"),
        education = education_rows(profile, ctx),
    );

    format!("{sidebar}{main}")
}
