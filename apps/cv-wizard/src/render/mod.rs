//! Layout renderer: pure functions from a profile to HTML.
//!
//! `render_resume` picks the template from `profile.layout`; every template
//! maps the same fields to the same `FieldPath`s and differs only in
//! arrangement. The cover letter has a single template. Wizard pages and the
//! preview shell live in `pages`.

pub mod html;
pub mod pages;

mod classic;
mod europass;
mod letter;
mod modern;

use std::fmt::Write;

use crate::export::{Artifact, RenderedDocument};
use crate::models::field_path::FieldPath;
use crate::models::patch::{EducationField, ExperienceField, LanguageField};
use crate::models::profile::{CandidateProfile, CvLayout, LANGUAGE_LEVELS};
use crate::wizard::enhance::EnhanceTarget;

use html::{escape, improve_button, slot, text_area};

/// A4 at 96 dpi.
pub const PAGE_WIDTH_PX: u32 = 794;
pub const PAGE_HEIGHT_PX: u32 = 1123;

#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub edit_mode: bool,
    /// Enhancement targets with a call in flight.
    pub busy: &'a [EnhanceTarget],
}

impl RenderContext<'static> {
    /// Read-only rendering, as used for export.
    pub const STATIC: RenderContext<'static> = RenderContext {
        edit_mode: false,
        busy: &[],
    };
}

impl RenderContext<'_> {
    pub fn is_busy(&self, target: &EnhanceTarget) -> bool {
        self.busy.contains(target)
    }
}

/// Résumé page in the profile's layout.
pub fn render_resume(profile: &CandidateProfile, ctx: &RenderContext<'_>) -> String {
    let inner = match profile.layout {
        CvLayout::Classic => classic::render(profile, ctx),
        CvLayout::Europass => europass::render(profile, ctx),
        CvLayout::Modern => modern::render(profile, ctx),
    };
    page(&format!("layout-{}", profile.layout.as_str()), &inner)
}

pub fn render_cover_letter(profile: &CandidateProfile, ctx: &RenderContext<'_>) -> String {
    page("letter", &letter::render(profile, ctx))
}

/// Static rendering of one artifact, handed to the exporter.
pub fn render_document(profile: &CandidateProfile, artifact: Artifact) -> RenderedDocument {
    let body = match artifact {
        Artifact::Resume => render_resume(profile, &RenderContext::STATIC),
        Artifact::CoverLetter => render_cover_letter(profile, &RenderContext::STATIC),
    };
    let name = if profile.full_name.trim().is_empty() {
        "Workly"
    } else {
        profile.full_name.trim()
    };
    RenderedDocument {
        artifact,
        title: format!("{name} - {}", artifact.label()),
        body,
    }
}

fn page(class: &str, inner: &str) -> String {
    format!(r#"<div class="a4-page {class}">{inner}</div>"#)
}

// ────────────────────────────────────────────────────────────────────────────
// Slots shared by the résumé templates
// ────────────────────────────────────────────────────────────────────────────

fn name_slot(profile: &CandidateProfile, ctx: &RenderContext<'_>, class: &str) -> String {
    slot(
        ctx,
        FieldPath::FullName,
        &profile.full_name,
        "Seu nome",
        &format!("user-name {class}"),
    )
}

/// Shows the target job while no profession is set; edits still write `profession`.
fn headline_slot(profile: &CandidateProfile, ctx: &RenderContext<'_>, class: &str) -> String {
    slot(ctx, FieldPath::Profession, profile.headline(), "Profissão", class)
}

fn summary_slot(profile: &CandidateProfile, ctx: &RenderContext<'_>) -> String {
    text_area(
        ctx,
        FieldPath::Summary,
        &profile.summary,
        "Resumo profissional...",
        "summary",
    )
}

fn contact_lines(profile: &CandidateProfile, ctx: &RenderContext<'_>) -> String {
    format!(
        r#"<div class="contact"><span class="icon">📧</span>{}</div><div class="contact"><span class="icon">📞</span>{}</div><div class="contact"><span class="icon">📍</span>{}</div>"#,
        slot(ctx, FieldPath::Email, &profile.email, "Email", "break-all"),
        slot(ctx, FieldPath::Phone, &profile.phone, "Telefone", ""),
        slot(ctx, FieldPath::Address, &profile.address, "Morada", ""),
    )
}

fn skills_block(profile: &CandidateProfile, ctx: &RenderContext<'_>, title: &str) -> String {
    format!(
        r#"<section class="skills"><div class="section-head">{}{}</div>{}</section>"#,
        html::section_title(title, "section-title"),
        improve_button(ctx, &EnhanceTarget::Skills, "✨ IA"),
        html::tag_list(ctx, FieldPath::Skills, &profile.skills, "tag"),
    )
}

fn qualities_block(profile: &CandidateProfile, ctx: &RenderContext<'_>) -> String {
    if profile.qualities.is_empty() && !ctx.edit_mode {
        return String::new();
    }
    format!(
        r#"<section class="qualities">{}{}</section>"#,
        html::section_title("Qualidades", "section-title"),
        html::tag_list(ctx, FieldPath::Qualities, &profile.qualities, "tag soft"),
    )
}

fn languages_block(profile: &CandidateProfile, ctx: &RenderContext<'_>) -> String {
    let mut out = format!(
        r#"<section class="languages">{}"#,
        html::section_title("Idiomas", "section-title")
    );
    for lang in &profile.languages {
        let level = if ctx.edit_mode {
            level_select(
                FieldPath::language(&lang.id, LanguageField::Level),
                &lang.level,
            )
        } else {
            format!(r#"<span class="level">{}</span>"#, escape(&lang.level))
        };
        let _ = write!(
            out,
            r#"<div class="language-row" data-row="{id}">{name}{level}</div>"#,
            id = escape(&lang.id),
            name = slot(
                ctx,
                FieldPath::language(&lang.id, LanguageField::Name),
                &lang.name,
                "Idioma",
                "language-name"
            ),
        );
    }
    out.push_str("</section>");
    out
}

/// `<select>` over the fixed level scale. An off-scale stored value is kept as
/// an extra option so it is not silently replaced.
pub fn level_select(path: FieldPath, current: &str) -> String {
    let mut out = format!(
        r#"<select class="slot level" data-path="{}">"#,
        escape(&path.to_string())
    );
    if !LANGUAGE_LEVELS.contains(&current) {
        let _ = write!(
            out,
            r#"<option value="{v}" selected>{v}</option>"#,
            v = escape(current)
        );
    }
    for level in LANGUAGE_LEVELS {
        let selected = if level == current { " selected" } else { "" };
        let _ = write!(out, r#"<option value="{level}"{selected}>{level}</option>"#);
    }
    out.push_str("</select>");
    out
}

/// How an experience row is laid out by a template.
#[derive(Debug, Clone, Copy)]
struct ExperienceStyle {
    /// Dates in a left gutter instead of next to the role.
    dates_in_gutter: bool,
    show_achievements: bool,
}

fn experience_rows(
    profile: &CandidateProfile,
    ctx: &RenderContext<'_>,
    style: ExperienceStyle,
) -> String {
    let mut out = String::from(r#"<div class="experiences">"#);
    for exp in &profile.experiences {
        let path = |field| FieldPath::experience(&exp.id, field);
        let dates = format!(
            r#"<div class="dates">{}<span class="sep">-</span>{}</div>"#,
            slot(ctx, path(ExperienceField::StartDate), &exp.start_date, "Início", ""),
            slot(ctx, path(ExperienceField::EndDate), &exp.end_date, "Fim", ""),
        );
        let role = slot(ctx, path(ExperienceField::Role), &exp.role, "Cargo", "role");
        let company = slot(
            ctx,
            path(ExperienceField::Company),
            &exp.company,
            "Empresa",
            "company",
        );
        let description = text_area(
            ctx,
            path(ExperienceField::Description),
            &exp.description,
            "Descreva suas atividades...",
            "description",
        );
        let achievements = if style.show_achievements
            && (ctx.edit_mode || !exp.achievements.trim().is_empty())
        {
            format!(
                r#"<div class="achievements">★ {}</div>"#,
                text_area(
                    ctx,
                    path(ExperienceField::Achievements),
                    &exp.achievements,
                    "Conquistas...",
                    "achievement",
                )
            )
        } else {
            String::new()
        };
        let improve = improve_button(ctx, &EnhanceTarget::experience(&exp.id), "Melhorar IA");

        let body = if style.dates_in_gutter {
            format!(
                r#"<div class="gutter">{dates}</div><div class="entry">{role}{company}<p>{description}</p>{improve}{achievements}</div>"#
            )
        } else {
            format!(
                r#"<div class="entry"><div class="row-head">{role}{dates}</div>{company}<p>{description}</p>{improve}{achievements}</div>"#
            )
        };
        let _ = write!(
            out,
            r#"<div class="experience" data-row="{}">{body}</div>"#,
            escape(&exp.id)
        );
    }
    out.push_str("</div>");
    out
}

fn education_rows(profile: &CandidateProfile, ctx: &RenderContext<'_>) -> String {
    let mut out = String::from(r#"<div class="education-list">"#);
    for edu in &profile.education {
        let path = |field| FieldPath::education(&edu.id, field);
        let _ = write!(
            out,
            r#"<div class="education" data-row="{id}">{degree}{institution}<div class="dates">{start}<span class="sep">-</span>{end}</div></div>"#,
            id = escape(&edu.id),
            degree = slot(ctx, path(EducationField::Degree), &edu.degree, "Curso", "degree"),
            institution = slot(
                ctx,
                path(EducationField::Institution),
                &edu.institution,
                "Instituição",
                "institution"
            ),
            start = slot(ctx, path(EducationField::StartDate), &edu.start_date, "Início", ""),
            end = slot(ctx, path(EducationField::EndDate), &edu.end_date, "Fim", ""),
        );
    }
    out.push_str("</div>");
    out
}

pub const STYLESHEET: &str = r#"
* { box-sizing: border-box; }
body { margin: 0; font-family: "Inter", "Helvetica Neue", Arial, sans-serif; color: #333; background: #f3f4f6; }
button { font-family: inherit; cursor: pointer; }
.a4-page { width: 794px; min-height: 1123px; background: #fff; overflow: hidden; position: relative; flex-shrink: 0; }
.a4-page h3 { margin: 0 0 12px; }
.placeholder { color: #b5b9c4; }
.body-text { white-space: pre-wrap; word-break: break-word; line-height: 2.2; letter-spacing: 0.05em; }
.user-name { letter-spacing: 0.1em; font-weight: 900; line-height: 1.2; }
.slot { width: 100%; font: inherit; color: inherit; background: rgba(238, 242, 255, 0.5); border: 0; border-bottom: 1px solid #c7d2fe; outline: none; }
.slot:focus { background: #fff; }
textarea.slot { resize: vertical; }
.tags { display: flex; flex-wrap: wrap; gap: 6px; }
.tag { padding: 3px 8px; border: 1px solid #e5e7eb; border-radius: 4px; font-size: 8px; font-weight: 700; }
.tag.soft { background: #eef2ff; border-color: #e0e7ff; }
.section-head { display: flex; justify-content: space-between; align-items: center; }
.section-title { font-size: 9px; font-weight: 900; text-transform: uppercase; letter-spacing: 0.1em; }
.improve { font-size: 8px; font-weight: 700; color: #fff; background: #4f46e5; border: 0; border-radius: 4px; padding: 2px 8px; }
.improve.busy { opacity: 0.5; }
.contact { display: flex; gap: 8px; font-size: 9px; line-height: 2.2; }
.break-all { word-break: break-all; }
.experience { margin-bottom: 28px; }
.row-head { display: flex; justify-content: space-between; gap: 12px; }
.role { font-weight: 700; text-transform: uppercase; font-size: 13px; }
.company { display: block; font-weight: 700; font-size: 10px; margin: 4px 0 8px; }
.description, .summary { font-size: 10px; }
.achievements { font-size: 9px; color: #4b5563; margin-top: 6px; }
.dates { font-size: 8px; font-weight: 900; display: flex; gap: 4px; white-space: nowrap; }
.education { margin-bottom: 14px; }
.degree { display: block; font-weight: 900; font-size: 10px; text-transform: uppercase; }
.institution { display: block; font-size: 9px; color: #9ca3af; }
.language-row { display: flex; justify-content: space-between; font-size: 9px; margin-bottom: 8px; }
.level { font-weight: 900; color: #2563eb; }
.photo-frame img { width: 100%; height: 100%; object-fit: cover; }

.layout-classic { display: flex; color: #2c3e50; }
.layout-classic .sidebar { width: 256px; background: #f4f7f9; padding: 40px; display: flex; flex-direction: column; gap: 40px; }
.layout-classic .photo-frame { width: 160px; height: 160px; border-radius: 50%; border: 4px solid #fff; overflow: hidden; margin: 0 auto; background: #dbeafe; }
.layout-classic .sidebar .section-title { color: #2563eb; text-align: center; border-bottom: 2px solid #dbeafe; padding-bottom: 4px; }
.layout-classic .main { flex: 1; padding: 56px; }
.layout-classic .header { border-bottom: 4px solid #f9fafb; padding-bottom: 32px; margin-bottom: 48px; }
.layout-classic .header .user-name { display: block; font-size: 30px; color: #111827; }
.layout-classic .headline { display: block; font-size: 18px; font-weight: 600; color: #3b82f6; text-transform: uppercase; letter-spacing: 0.1em; }
.layout-classic .main .section-title { color: #d1d5db; }
.layout-classic .experience { display: flex; gap: 32px; }
.layout-classic .gutter { width: 96px; flex-shrink: 0; }
.layout-classic .gutter .dates { flex-direction: column; color: #9ca3af; }
.layout-classic .company { color: #2563eb; }

.layout-europass { display: flex; flex-direction: column; }
.layout-europass .band { background: #003366; color: #fff; padding: 48px; display: flex; align-items: center; gap: 32px; border-bottom: 6px solid #60a5fa; }
.layout-europass .photo-frame { width: 96px; height: 128px; border-radius: 8px; overflow: hidden; background: #fff; border: 2px solid rgba(255,255,255,0.5); }
.layout-europass .band .user-name { display: block; font-size: 20px; text-transform: uppercase; }
.layout-europass .headline { display: block; font-size: 14px; font-weight: 700; opacity: 0.9; margin-top: 4px; }
.layout-europass .origin { display: flex; gap: 12px; font-size: 8px; opacity: 0.8; margin-top: 8px; }
.layout-europass .brand { margin-left: auto; font-weight: 900; letter-spacing: 0.2em; opacity: 0.2; text-transform: uppercase; }
.layout-europass .columns { display: flex; flex: 1; }
.layout-europass .sidebar { width: 240px; background: #f9fafb; padding: 40px; border-right: 1px solid #f3f4f6; display: flex; flex-direction: column; gap: 48px; }
.layout-europass .sidebar .section-title { color: #1e40af; border-bottom: 2px solid #dbeafe; padding-bottom: 4px; }
.layout-europass .main { flex: 1; padding: 40px; }
.layout-europass .main h2 { font-size: 16px; font-weight: 900; color: #1e3a8a; border-bottom: 2px solid #eff6ff; padding-bottom: 8px; letter-spacing: 0.1em; }
.layout-europass .experience { padding-left: 24px; border-left: 2px solid #dbeafe; }
.layout-europass .company { color: #1e40af; }
.layout-europass .dates { color: #2563eb; }

.layout-modern { display: flex; flex-direction: column; }
.layout-modern .header { background: #f8fafc; padding: 48px; display: flex; align-items: center; gap: 40px; border-bottom: 2px solid #f3f4f6; }
.layout-modern .photo-frame { width: 144px; height: 144px; border-radius: 16px; transform: rotate(2deg); border: 4px solid #fff; overflow: hidden; background: #e0e7ff; }
.layout-modern .header .user-name { display: block; font-size: 30px; color: #111827; margin-bottom: 12px; }
.layout-modern .accent { height: 6px; width: 96px; background: #4f46e5; border-radius: 999px; margin-bottom: 16px; }
.layout-modern .headline { display: block; font-size: 18px; color: #4f46e5; font-weight: 700; text-transform: uppercase; letter-spacing: 0.1em; }
.layout-modern .columns { display: flex; padding: 48px; gap: 48px; }
.layout-modern .main { flex: 1.6; }
.layout-modern .main h2 { font-size: 18px; font-weight: 900; color: #1f2937; }
.layout-modern .quote { border-left: 4px solid #e0e7ff; padding-left: 24px; font-style: italic; }
.layout-modern .entry-card { background: #f9fafb; padding: 24px; border-radius: 12px; }
.layout-modern .side { flex: 1; display: flex; flex-direction: column; gap: 40px; }
.layout-modern .contact-card { background: #111827; color: #fff; padding: 24px; border-radius: 16px; }
.layout-modern .contact-card .section-title { color: #818cf8; }
.layout-modern .company { color: #818cf8; }
.layout-modern .dates { color: #c7d2fe; }

.letter { padding: 96px; color: #1f2937; }
.letter .letter-head { display: flex; justify-content: space-between; margin-bottom: 48px; }
.letter .letter-head .user-name { display: block; font-size: 30px; color: #4f46e5; text-transform: uppercase; }
.letter .contact-line { font-size: 14px; color: #9ca3af; font-weight: 700; margin-top: 8px; }
.letter .address-line { font-size: 9px; color: #d1d5db; text-transform: uppercase; letter-spacing: 0.1em; margin-top: 4px; }
.letter .date { font-size: 9px; color: #9ca3af; font-weight: 900; text-transform: uppercase; }
.letter .subject-label { font-size: 9px; font-weight: 900; color: #d1d5db; text-transform: uppercase; letter-spacing: 0.1em; margin: 0 0 4px; }
.letter .subject { display: flex; gap: 8px; font-size: 20px; font-weight: 900; text-transform: uppercase; }
.letter .letter-body { min-height: 650px; margin-top: 40px; font-size: 15px; line-height: 2.3; color: #4b5563; }
.letter .closing { margin-top: 48px; border-top: 1px solid #f9fafb; padding-top: 32px; }
.letter .closing-label { font-size: 8px; font-style: italic; font-weight: 700; color: #9ca3af; text-transform: uppercase; letter-spacing: 0.1em; margin: 0 0 12px; }
.letter .closing .user-name { display: block; font-size: 20px; text-transform: uppercase; }
.letter .signature-bar { width: 48px; height: 4px; background: #4f46e5; margin-top: 8px; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::Experience;
    use crate::wizard::sample::sample_profile;

    fn edit_ctx() -> RenderContext<'static> {
        RenderContext {
            edit_mode: true,
            busy: &[],
        }
    }

    #[test]
    fn test_every_layout_renders_the_name() {
        let mut profile = sample_profile();
        for layout in CvLayout::ALL {
            profile.layout = layout;
            let page = render_resume(&profile, &RenderContext::STATIC);
            assert!(page.contains("Ricardo Oliveira Machado"), "{layout:?}");
            assert!(page.contains(&format!("layout-{}", layout.as_str())));
        }
    }

    #[test]
    fn test_europass_embeds_data_url_photo() {
        let mut profile = sample_profile();
        profile.layout = CvLayout::Europass;
        profile.profile_photo = "data:image/jpeg;base64,/9j/4AAQSkZJRg==".into();

        let page = render_resume(&profile, &RenderContext::STATIC);
        assert!(page.contains(r#"<img src="data:image/jpeg;base64,/9j/4AAQSkZJRg==" alt="">"#));
    }

    #[test]
    fn test_static_mode_emits_no_controls() {
        let mut profile = sample_profile();
        for layout in CvLayout::ALL {
            profile.layout = layout;
            let page = render_resume(&profile, &RenderContext::STATIC);
            assert!(!page.contains("data-path"), "{layout:?}");
            assert!(!page.contains("<input"));
            assert!(!page.contains("data-action"));
        }
        let letter = render_cover_letter(&profile, &RenderContext::STATIC);
        assert!(!letter.contains("data-path"));
    }

    #[test]
    fn test_edit_mode_emits_paths_for_every_row() {
        let mut profile = sample_profile();
        for layout in CvLayout::ALL {
            profile.layout = layout;
            let page = render_resume(&profile, &edit_ctx());
            for path in [
                "full_name",
                "profession",
                "summary",
                "skills",
                "experiences/1/description",
                "experiences/2/role",
                "education/edu1/degree",
                "languages/lang2/level",
            ] {
                assert!(
                    page.contains(&format!("data-path=\"{path}\"")),
                    "{layout:?} lacks {path}"
                );
            }
            assert!(page.contains("data-action=\"enhance/experiences/1\""));
            assert!(page.contains("data-action=\"enhance/skills\""));
        }
    }

    #[test]
    fn test_achievements_only_in_europass_and_modern() {
        let mut profile = sample_profile();
        let path = "data-path=\"experiences/1/achievements\"";
        profile.layout = CvLayout::Classic;
        assert!(!render_resume(&profile, &edit_ctx()).contains(path));
        profile.layout = CvLayout::Europass;
        assert!(render_resume(&profile, &edit_ctx()).contains(path));
        profile.layout = CvLayout::Modern;
        assert!(render_resume(&profile, &edit_ctx()).contains(path));
    }

    #[test]
    fn test_values_are_escaped() {
        let mut profile = CandidateProfile {
            full_name: "<script>alert(1)</script>".into(),
            ..Default::default()
        };
        profile.experiences.push(Experience {
            id: "x\"y".into(),
            description: "a & b".into(),
            ..Default::default()
        });
        for layout in CvLayout::ALL {
            profile.layout = layout;
            let page = render_resume(&profile, &edit_ctx());
            assert!(!page.contains("<script>"));
            assert!(page.contains("&lt;script&gt;"));
            assert!(page.contains("a &amp; b"));
            assert!(page.contains("experiences/x&quot;y/description"));
        }
    }

    #[test]
    fn test_headline_falls_back_to_target_job() {
        let profile = CandidateProfile {
            target_job: "Data Lead".into(),
            ..Default::default()
        };
        let page = render_resume(&profile, &edit_ctx());
        assert!(page.contains(r#"data-path="profession" value="Data Lead""#));
    }

    #[test]
    fn test_level_select_keeps_off_scale_value() {
        let select = level_select(FieldPath::language("l", LanguageField::Level), "Fluente");
        assert!(select.contains(r#"<option value="Fluente" selected>"#));
        let select = level_select(FieldPath::language("l", LanguageField::Level), "C1");
        assert!(select.contains(r#"<option value="C1" selected>"#));
        assert_eq!(select.matches("<option").count(), LANGUAGE_LEVELS.len());
    }

    #[test]
    fn test_document_title_uses_name_and_label() {
        let doc = render_document(&sample_profile(), Artifact::CoverLetter);
        assert_eq!(doc.title, "Ricardo Oliveira Machado - Carta");
        assert!(doc.body.starts_with(r#"<div class="a4-page letter">"#));
    }
}
