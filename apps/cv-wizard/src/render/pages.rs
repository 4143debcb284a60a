//! Full HTML pages for a session: onboarding, the three form steps and the
//! preview shell.
//!
//! Pages are re-rendered from the session on every load. Every control posts
//! straight to the JSON API: inputs tagged `data-path` on each keystroke, and
//! buttons tagged `data-action` followed by a reload.

use std::fmt::Write;

use serde_json::{json, Value};

use crate::models::field_path::FieldPath;
use crate::models::patch::{EducationField, ExperienceField, LanguageField};
use crate::models::profile::{join_list, CandidateProfile, CvLayout};
use crate::render::html::{escape, photo};
use crate::render::{
    level_select, render_cover_letter, render_resume, RenderContext, PAGE_HEIGHT_PX,
    PAGE_WIDTH_PX, STYLESHEET,
};
use crate::wizard::enhance::EnhanceTarget;
use crate::wizard::session::{PreviewTab, WizardSession};
use crate::wizard::step::{Step, FORM_STEPS};

const SHELL_CSS: &str = r#"
.shell { min-height: 100vh; display: flex; align-items: center; justify-content: center; padding: 24px; }
.card { width: 100%; max-width: 860px; background: #fff; border-radius: 32px; box-shadow: 0 20px 50px rgba(30, 27, 75, 0.08); overflow: hidden; }
.card-body { padding: 40px; }
.brand-mark { width: 32px; height: 32px; background: #4f46e5; color: #fff; border-radius: 8px; display: inline-flex; align-items: center; justify-content: center; font-weight: 900; font-style: italic; }
.progress { display: flex; justify-content: space-between; align-items: center; padding: 24px 40px; border-bottom: 1px solid #f3f4f6; font-size: 11px; font-weight: 900; letter-spacing: 0.2em; color: #9ca3af; }
.progress-bar { height: 4px; background: #eef2ff; }
.progress-bar div { height: 100%; background: #4f46e5; }
.form-grid { display: grid; grid-template-columns: 1fr 1fr; gap: 14px; }
.form-grid .wide { grid-column: 1 / -1; }
.field { display: flex; flex-direction: column; gap: 6px; font-size: 11px; font-weight: 700; color: #6b7280; text-transform: uppercase; letter-spacing: 0.05em; }
.field input, .field textarea, .field select { padding: 12px 14px; border: 1px solid #e5e7eb; border-radius: 14px; background: #f9fafb; font: inherit; font-size: 14px; text-transform: none; color: #111827; }
.field textarea { min-height: 96px; resize: vertical; }
.row-card { border: 1px solid #f3f4f6; border-radius: 20px; padding: 18px; margin-bottom: 14px; background: #fcfcfd; }
.row-card .remove { float: right; background: none; border: 0; color: #ef4444; font-size: 11px; font-weight: 700; }
.layout-picker { display: flex; gap: 10px; }
.layout-picker button { flex: 1; padding: 14px; border-radius: 14px; border: 2px solid #f3f4f6; background: #fff; font-weight: 900; text-transform: uppercase; font-size: 11px; }
.layout-picker button.active { border-color: #4f46e5; color: #4f46e5; }
.summary-box { background: #4f46e5; color: #fff; border-radius: 24px; padding: 24px; margin-bottom: 18px; }
.summary-box textarea { width: 100%; min-height: 96px; border-radius: 16px; border: 1px solid #818cf8; background: rgba(67, 56, 202, 0.5); color: #fff; padding: 14px; font: inherit; }
.ghost { background: none; border: 2px dashed #e0e7ff; color: #4f46e5; border-radius: 14px; padding: 12px; width: 100%; font-weight: 900; font-size: 11px; }
.nav { display: flex; justify-content: space-between; padding: 24px 40px; border-top: 1px solid #f3f4f6; }
.primary { background: #4f46e5; color: #fff; border: 0; border-radius: 16px; padding: 16px 28px; font-weight: 900; letter-spacing: 0.05em; }
.primary:disabled, .secondary:disabled { opacity: 0.5; }
.secondary { background: none; border: 0; color: #9ca3af; font-weight: 700; }
.accent-btn { background: #fff; color: #4f46e5; border: 0; border-radius: 12px; padding: 8px 14px; font-weight: 900; font-size: 11px; }
.generating { padding: 24px 40px; color: #4f46e5; font-weight: 700; text-align: center; }
.hero { text-align: center; padding: 56px 40px; }
.hero h1 { font-size: 40px; font-weight: 900; margin: 16px 0 32px; color: #111827; }
.hero .actions { display: flex; gap: 12px; justify-content: center; }
.manual { display: grid; grid-template-columns: repeat(3, 1fr); gap: 16px; padding: 0 40px 48px; }
.manual div { background: #f9fafb; border-radius: 20px; padding: 20px; font-size: 13px; color: #6b7280; }
.manual h4 { margin: 8px 0; color: #111827; }
.preview { display: flex; min-height: 100vh; }
.preview-side { width: 320px; background: #fff; padding: 32px; box-shadow: 0 0 30px rgba(0,0,0,0.06); position: sticky; top: 0; height: 100vh; overflow-y: auto; }
.preview-side .primary, .preview-side .toggle { width: 100%; margin-bottom: 12px; }
.preview-side .download { display: block; text-align: center; text-decoration: none; background: #111827; color: #fff; border-radius: 16px; padding: 16px; font-weight: 900; margin-bottom: 12px; }
.toggle { padding: 16px; border-radius: 16px; border: 2px solid #f3f4f6; background: #fff; font-weight: 900; }
.toggle.active { background: #4f46e5; color: #fff; border-color: #4f46e5; }
.tips-title { display: block; margin: 32px 0 16px; font-size: 10px; font-weight: 900; color: #d1d5db; text-transform: uppercase; letter-spacing: 0.2em; }
.tip { background: rgba(238, 242, 255, 0.5); border: 1px solid #e0e7ff; border-radius: 18px; padding: 14px; margin-bottom: 12px; }
.tip .category { font-size: 9px; font-weight: 900; color: #4f46e5; text-transform: uppercase; }
.tip p { margin: 4px 0; font-size: 12px; font-weight: 700; color: #374151; }
.tip small { font-size: 10px; color: #9ca3af; font-style: italic; }
.preview-main { flex: 1; display: flex; flex-direction: column; align-items: center; background: #fafafa; }
.tabs { display: flex; background: #fff; padding: 4px; border-radius: 16px; margin: 16px; box-shadow: 0 10px 25px rgba(0,0,0,0.06); width: 100%; max-width: 420px; }
.tabs button { flex: 1; padding: 12px; border: 0; border-radius: 12px; background: none; font-size: 10px; font-weight: 900; letter-spacing: 0.2em; text-transform: uppercase; color: #9ca3af; }
.tabs button.active { background: #4f46e5; color: #fff; }
.page-frame { box-shadow: 0 25px 50px rgba(0,0,0,0.15); margin: 32px 0 80px; }
"#;

const SCRIPT: &str = r#"
const session = document.body.dataset.session;
const endpoint = (path) => `/api/v1/sessions/${session}/${path}`;

async function send(method, path, body) {
  const res = await fetch(endpoint(path), {
    method,
    headers: { 'Content-Type': 'application/json' },
    body: body === undefined ? undefined : JSON.stringify(body),
  });
  if (!res.ok) {
    const payload = await res.json().catch(() => null);
    if (payload && payload.error) console.warn(payload.error.code, payload.error.message);
  }
  return res;
}

document.addEventListener('input', (event) => {
  const path = event.target.dataset && event.target.dataset.path;
  if (path) send('POST', 'fields', { path, value: event.target.value });
});

document.addEventListener('change', (event) => {
  const path = event.target.dataset && event.target.dataset.upload;
  const file = path && event.target.files && event.target.files[0];
  if (!file) return;
  const reader = new FileReader();
  reader.onloadend = async () => {
    await send('POST', 'fields', { path, value: reader.result });
    window.location.reload();
  };
  reader.readAsDataURL(file);
});

document.addEventListener('click', async (event) => {
  const button = event.target.closest('[data-action]');
  if (!button || button.disabled) return;
  button.disabled = true;
  if (button.dataset.pending) button.textContent = button.dataset.pending;
  const body = button.dataset.body ? JSON.parse(button.dataset.body) : undefined;
  await send(button.dataset.method || 'POST', button.dataset.action, body);
  window.location.reload();
});
"#;

/// The page for the session's current step.
pub fn render_session_page(session: &WizardSession) -> String {
    let body = match session.step() {
        Step::Onboarding => onboarding(),
        Step::Step1 | Step::Step2 | Step::Step3 => form_step(session),
        Step::Preview => preview(session),
    };
    shell(&session.id().to_string(), &body)
}

fn shell(session_id: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"pt\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>Workly AI</title>\n<style>{STYLESHEET}{SHELL_CSS}</style>\n</head>\n\
         <body data-session=\"{id}\">\n{body}\n<script>{SCRIPT}</script>\n</body>\n</html>\n",
        id = escape(session_id),
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Controls
// ────────────────────────────────────────────────────────────────────────────

/// Button posting to `action`. `body` is sent as JSON when present.
fn action_button(
    class: &str,
    action: &str,
    label: &str,
    body: Option<Value>,
    disabled: bool,
) -> String {
    let body = body
        .map(|b| format!(r#" data-body="{}""#, escape(&b.to_string())))
        .unwrap_or_default();
    let disabled = if disabled { " disabled" } else { "" };
    format!(
        r#"<button type="button" class="{class}" data-action="{action}"{body}{disabled}>{}</button>"#,
        escape(label)
    )
}

/// Button sending a `ProfileEdit` to the profile endpoint.
fn edit_button(class: &str, label: &str, edit: Value) -> String {
    format!(
        r#"<button type="button" class="{class}" data-action="profile" data-method="PATCH" data-body="{}">{}</button>"#,
        escape(&edit.to_string()),
        escape(label)
    )
}

fn input(label: &str, path: FieldPath, value: &str, placeholder: &str, class: &str) -> String {
    format!(
        r#"<label class="field {class}">{label}<input type="text" data-path="{path}" value="{value}" placeholder="{placeholder}"></label>"#,
        label = escape(label),
        path = escape(&path.to_string()),
        value = escape(value),
        placeholder = escape(placeholder),
    )
}

/// Image picker. The chosen file is read as a data URL and written to `path`.
fn image_upload(label: &str, path: FieldPath) -> String {
    format!(
        r#"<label class="field upload">{label}<input type="file" accept="image/*" data-upload="{path}"></label>"#,
        label = escape(label),
        path = escape(&path.to_string()),
    )
}

fn area(label: &str, path: FieldPath, value: &str, placeholder: &str) -> String {
    format!(
        r#"<label class="field wide">{label}<textarea data-path="{path}" placeholder="{placeholder}">{value}</textarea></label>"#,
        label = escape(label),
        path = escape(&path.to_string()),
        value = escape(value),
        placeholder = escape(placeholder),
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Onboarding
// ────────────────────────────────────────────────────────────────────────────

fn onboarding() -> String {
    let manual = [
        (
            "👤",
            "Identidade e Estilo",
            "Insira seus dados básicos, nacionalidade e escolha um dos 3 layouts premium.",
        ),
        (
            "💼",
            "Trajetória Real",
            "Adicione suas experiências e educação. Descreva-as de forma simples; a IA cuidará do tom profissional.",
        ),
        (
            "⚡",
            "Refino e Download",
            "Revise as sugestões da IA, gere sua carta automática e baixe seu PDF de alta qualidade.",
        ),
    ];
    let mut steps = String::new();
    for (icon, title, text) in manual {
        let _ = write!(steps, "<div><span>{icon}</span><h4>{title}</h4>{text}</div>");
    }

    format!(
        r#"<div class="shell"><div class="card"><div class="hero"><span class="brand-mark">W</span> <strong>Workly</strong><h1>Currículo de Elite em Minutos</h1><div class="actions">{start}{quick}</div></div><h3 style="padding: 0 40px">Manual de Uso</h3><div class="manual">{steps}</div></div></div>"#,
        start = action_button("primary", "advance", "COMEÇAR AGORA", None, false),
        quick = action_button("accent-btn", "quick-test", "✨ TESTE RÁPIDO", None, false),
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Form steps
// ────────────────────────────────────────────────────────────────────────────

fn form_step(session: &WizardSession) -> String {
    let step = session.step();
    let number = step.form_number().unwrap_or(1);
    let profile = session.profile();
    let content = match step {
        Step::Step1 => identity_step(profile),
        Step::Step2 => history_step(profile),
        _ => strategy_step(session),
    };

    let generating = session.is_generating();
    let next = if step == Step::Step3 {
        format!(
            r#"<button type="button" class="primary" data-action="advance" data-pending="AGUARDE..."{}>{}</button>"#,
            if generating { " disabled" } else { "" },
            if generating { "AGUARDE..." } else { "GERAR CURRÍCULO" },
        )
    } else {
        action_button("primary", "advance", "PRÓXIMO PASSO", None, generating)
    };
    let notice = if generating {
        r#"<div class="generating">Nossa IA está unindo suas experiências, habilidades e história para criar um currículo e uma carta de apresentação de elite...</div>"#
    } else {
        ""
    };
    let progress = u32::from(number) * 100 / u32::from(FORM_STEPS);

    format!(
        r#"<div class="shell"><div class="card"><div class="progress"><span><span class="brand-mark">W</span> Workly AI</span><span>PASSO {number} / {FORM_STEPS}</span></div><div class="progress-bar"><div style="width: {progress}%"></div></div><div class="card-body">{content}</div>{notice}<div class="nav">{back}{next}</div></div></div>"#,
        back = action_button("secondary", "retreat", "Anterior", None, generating),
    )
}

fn identity_step(profile: &CandidateProfile) -> String {
    let mut picker = String::from(r#"<div class="layout-picker">"#);
    for layout in CvLayout::ALL {
        let class = if layout == profile.layout { "active" } else { "" };
        picker.push_str(&action_button(
            class,
            "fields",
            layout.as_str(),
            Some(json!({ "path": "layout", "value": layout.as_str() })),
            false,
        ));
    }
    picker.push_str("</div>");

    format!(
        r#"<h2>Identidade &amp; Estilo</h2><p>Começamos pelo básico e pelo visual do seu novo currículo.</p><div class="form-grid">{preview}{upload}{photo_url}{name}{profession}{nationality}{city}{email}{phone}{address}</div><h3>Escolha o seu Layout</h3>{picker}"#,
        preview = photo(&profile.profile_photo, "photo-frame"),
        upload = image_upload("Foto 3x4", FieldPath::ProfilePhoto),
        photo_url = input(
            "Foto 3x4 (URL)",
            FieldPath::ProfilePhoto,
            &profile.profile_photo,
            "https://...",
            "wide"
        ),
        name = input("Nome", FieldPath::FullName, &profile.full_name, "Nome Completo", ""),
        profession = input(
            "Profissão",
            FieldPath::Profession,
            &profile.profession,
            "Profissão (Ex: Gestor de Vendas)",
            ""
        ),
        nationality = input(
            "Nacionalidade",
            FieldPath::Nationality,
            &profile.nationality,
            "Nacionalidade",
            ""
        ),
        city = input("Cidade", FieldPath::City, &profile.city, "Cidade", ""),
        email = input("Email", FieldPath::Email, &profile.email, "Email", ""),
        phone = input("Telefone", FieldPath::Phone, &profile.phone, "Telefone", ""),
        address = input("Morada", FieldPath::Address, &profile.address, "Morada", "wide"),
    )
}

fn history_step(profile: &CandidateProfile) -> String {
    let mut out = String::from("<h2>Experiência Profissional</h2>");
    for exp in &profile.experiences {
        let path = |field| FieldPath::experience(&exp.id, field);
        let _ = write!(
            out,
            r#"<div class="row-card" data-row="{id}">{remove}<div class="form-grid">{company}{role}{start}{end}{description}{achievements}</div></div>"#,
            id = escape(&exp.id),
            remove = edit_button(
                "remove",
                "Remover",
                json!({ "op": "remove_experience", "id": exp.id })
            ),
            company = input("Empresa", path(ExperienceField::Company), &exp.company, "Empresa", ""),
            role = input("Cargo", path(ExperienceField::Role), &exp.role, "Cargo", ""),
            start = input(
                "Início",
                path(ExperienceField::StartDate),
                &exp.start_date,
                "Início (Ex: Jan 2018)",
                ""
            ),
            end = input(
                "Fim",
                path(ExperienceField::EndDate),
                &exp.end_date,
                "Fim (Ex: Presente)",
                ""
            ),
            description = area(
                "Descrição",
                path(ExperienceField::Description),
                &exp.description,
                "Fale sobre suas responsabilidades (A IA vai melhorar depois)"
            ),
            achievements = area(
                "Conquistas",
                path(ExperienceField::Achievements),
                &exp.achievements,
                "Resultados mensuráveis, prémios..."
            ),
        );
    }
    out.push_str(&edit_button(
        "ghost",
        "+ ADICIONAR EXPERIÊNCIA",
        json!({ "op": "add_experience" }),
    ));

    out.push_str("<h2>Educação</h2>");
    for edu in &profile.education {
        let path = |field| FieldPath::education(&edu.id, field);
        let _ = write!(
            out,
            r#"<div class="row-card" data-row="{id}">{remove}<div class="form-grid">{institution}{degree}{start}{end}</div></div>"#,
            id = escape(&edu.id),
            remove = edit_button(
                "remove",
                "Remover",
                json!({ "op": "remove_education", "id": edu.id })
            ),
            institution = input(
                "Instituição",
                path(EducationField::Institution),
                &edu.institution,
                "Instituição",
                ""
            ),
            degree = input(
                "Curso",
                path(EducationField::Degree),
                &edu.degree,
                "Curso / Grau",
                ""
            ),
            start = input("Início", path(EducationField::StartDate), &edu.start_date, "Início", ""),
            end = input("Fim", path(EducationField::EndDate), &edu.end_date, "Fim", ""),
        );
    }
    out.push_str(&edit_button(
        "ghost",
        "+ ADICIONAR EDUCAÇÃO",
        json!({ "op": "add_education" }),
    ));
    out
}

fn strategy_step(session: &WizardSession) -> String {
    let profile = session.profile();
    let summary_busy = session.busy_targets().contains(&EnhanceTarget::Summary);
    let optimize = action_button(
        "accent-btn",
        "enhance/summary",
        if summary_busy { "Otimizando…" } else { "✨ OTIMIZAR IA" },
        None,
        summary_busy || profile.summary.trim().is_empty(),
    );

    let mut languages = String::new();
    for lang in &profile.languages {
        let _ = write!(
            languages,
            r#"<div class="row-card" data-row="{id}">{remove}<div class="form-grid">{name}<label class="field">Nível{level}</label></div></div>"#,
            id = escape(&lang.id),
            remove = edit_button(
                "remove",
                "×",
                json!({ "op": "remove_language", "id": lang.id })
            ),
            name = input(
                "Idioma",
                FieldPath::language(&lang.id, LanguageField::Name),
                &lang.name,
                "Idioma",
                ""
            ),
            level = level_select(
                FieldPath::language(&lang.id, LanguageField::Level),
                &lang.level
            ),
        );
    }

    format!(
        r#"<div class="summary-box"><div class="section-head"><h2>Estratégia de Perfil (CV)</h2>{optimize}</div><textarea data-path="summary" placeholder="Escreva um breve resumo de sua carreira para o currículo...">{summary}</textarea></div><div class="form-grid">{history}{target_job}{skills}{qualities}</div><h3>Idiomas</h3>{languages}{add_language}"#,
        summary = escape(&profile.summary),
        history = area(
            "Sua História (Para a Carta)",
            FieldPath::PersonalHistory,
            &profile.personal_history,
            "Conte um pouco sobre sua trajetória pessoal, motivações e o que te faz o candidato ideal."
        ),
        target_job = input(
            "Vaga Pretendida",
            FieldPath::TargetJob,
            &profile.target_job,
            "Ex: Head of Supply Chain",
            "wide"
        ),
        skills = input(
            "Habilidades Técnicas",
            FieldPath::Skills,
            &join_list(&profile.skills),
            "Ex: React, Vendas B2B, Gestão Financeira...",
            "wide"
        ),
        qualities = input(
            "Qualidades",
            FieldPath::Qualities,
            &join_list(&profile.qualities),
            "Ex: Liderança, Resiliência...",
            "wide"
        ),
        add_language = edit_button("ghost", "+ Adicionar", json!({ "op": "add_language" })),
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Preview
// ────────────────────────────────────────────────────────────────────────────

fn preview(session: &WizardSession) -> String {
    let profile = session.profile();
    let busy = session.busy_targets();
    let ctx = RenderContext {
        edit_mode: session.edit_mode(),
        busy: &busy,
    };
    let tab = session.tab();

    let (page, artifact) = match tab {
        PreviewTab::Cv => (render_resume(profile, &ctx), "cv"),
        PreviewTab::Letter => (render_cover_letter(profile, &ctx), "letter"),
    };

    let edit_toggle = action_button(
        if ctx.edit_mode { "toggle active" } else { "toggle" },
        "preview",
        if ctx.edit_mode { "SALVAR" } else { "EDITAR" },
        Some(json!({ "edit_mode": !ctx.edit_mode })),
        false,
    );
    let download = format!(
        r#"<a class="download" href="/sessions/{id}/export/{artifact}">BAIXAR PDF</a>"#,
        id = session.id(),
    );

    let mut tips = String::new();
    for suggestion in profile.ai_suggestions.iter().flatten() {
        let _ = write!(
            tips,
            r#"<div class="tip"><span class="category">{}</span><p>{}</p><small>{}</small></div>"#,
            escape(suggestion.category.label()),
            escape(&suggestion.text),
            escape(&suggestion.reason),
        );
    }

    let tab_button = |target: PreviewTab, value: &str, label: &str| {
        action_button(
            if tab == target { "active" } else { "" },
            "preview",
            label,
            Some(json!({ "tab": value })),
            false,
        )
    };

    format!(
        r#"<div class="preview"><aside class="preview-side"><p><span class="brand-mark">W</span> <strong>Workly AI</strong></p>{edit_toggle}{download}{back}<label class="tips-title">Dicas Workly</label>{tips}</aside><div class="preview-main"><div class="tabs">{cv_tab}{letter_tab}</div><div class="page-frame" style="width: {PAGE_WIDTH_PX}px; min-height: {PAGE_HEIGHT_PX}px">{page}</div></div></div>"#,
        back = action_button("secondary", "retreat", "← Voltar ao Formulário", None, false),
        cv_tab = tab_button(PreviewTab::Cv, "cv", "Currículo"),
        letter_tab = tab_button(PreviewTab::Letter, "letter", "Carta"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::patch::{ProfileEdit, ProfilePatch};
    use crate::wizard::session::{Advance, GenerationOutcome};

    fn at(step: Step) -> WizardSession {
        let mut session = WizardSession::new(Some(ProfilePatch {
            full_name: Some("Ana Lima".into()),
            ..Default::default()
        }));
        while session.step() != step {
            if let Advance::Generate(_) = session.advance().unwrap() {
                session.complete_generation(GenerationOutcome {
                    cover_letter: Ok("Carta".into()),
                    suggestions: Ok(vec![]),
                });
            }
        }
        session
    }

    #[test]
    fn test_onboarding_offers_start_and_quick_test() {
        let page = render_session_page(&at(Step::Onboarding));
        assert!(page.contains("COMEÇAR AGORA"));
        assert!(page.contains(r#"data-action="quick-test""#));
        assert!(page.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn test_form_steps_show_progress() {
        for (step, n) in [(Step::Step1, 1), (Step::Step2, 2), (Step::Step3, 3)] {
            let page = render_session_page(&at(step));
            assert!(page.contains(&format!("PASSO {n} / 3")));
            assert!(page.contains("Anterior"));
        }
        assert!(render_session_page(&at(Step::Step3)).contains("GERAR CURRÍCULO"));
        assert!(render_session_page(&at(Step::Step1)).contains("PRÓXIMO PASSO"));
    }

    #[test]
    fn test_identity_step_marks_active_layout() {
        let page = render_session_page(&at(Step::Step1));
        assert!(page.contains(r#"class="active" data-action="fields""#));
        assert!(page.contains(r#"value="Ana Lima""#));
    }

    #[test]
    fn test_history_step_lists_rows_with_remove() {
        let mut session = at(Step::Step2);
        session.apply(ProfileEdit::AddExperience).unwrap();
        let id = session.profile().experiences[0].id.clone();
        let page = render_session_page(&session);
        assert!(page.contains(&format!("data-path=\"experiences/{id}/company\"")));
        assert!(page.contains("remove_experience"));
        assert!(page.contains("add_education"));
    }

    #[test]
    fn test_identity_step_offers_photo_upload() {
        let page = render_session_page(&at(Step::Step1));
        assert!(page.contains(
            r#"<input type="file" accept="image/*" data-upload="profile_photo">"#
        ));
        assert!(page.contains("readAsDataURL"));
        assert!(page.contains("photo-empty"));
    }

    #[test]
    fn test_uploaded_photo_previews_on_identity_step() {
        let mut session = at(Step::Step1);
        let edit = FieldPath::ProfilePhoto
            .into_edit("data:image/png;base64,iVBORw0KGgo=".into())
            .unwrap();
        session.apply(edit).unwrap();
        let page = render_session_page(&session);
        assert!(page.contains(r#"<img src="data:image/png;base64,iVBORw0KGgo=" alt="">"#));
    }

    #[test]
    fn test_next_disabled_after_retreat_during_generation() {
        let mut session = at(Step::Step3);
        session.advance().unwrap();
        session.retreat().unwrap();
        assert_eq!(session.step(), Step::Step2);
        assert!(session.is_generating());

        let page = render_session_page(&session);
        assert!(page.contains(
            r#"<button type="button" class="primary" data-action="advance" disabled>PRÓXIMO PASSO</button>"#
        ));
        assert!(page.contains("Nossa IA está unindo"));
    }

    #[test]
    fn test_generating_disables_navigation() {
        let mut session = at(Step::Step3);
        session.advance().unwrap();
        let page = render_session_page(&session);
        assert!(page.contains("AGUARDE..."));
        assert!(page.contains("Nossa IA está unindo"));
    }

    #[test]
    fn test_preview_shows_tabs_tips_and_export_link() {
        let mut session = WizardSession::new(None);
        session.quick_test().unwrap();
        let id = session.id();
        let page = render_session_page(&session);
        assert!(page.contains("Dicas Workly"));
        assert_eq!(page.matches(r#"class="tip""#).count(), 4);
        assert!(page.contains(&format!("/sessions/{id}/export/cv")));
        assert!(page.contains("EDITAR"));
        assert!(!page.contains("data-path"));

        session.set_preview(Some(PreviewTab::Letter), Some(true));
        let page = render_session_page(&session);
        assert!(page.contains(&format!("/sessions/{id}/export/letter")));
        assert!(page.contains("Candidatura ao cargo de:"));
        assert!(page.contains(r#"data-path="cover_letter""#));
        assert!(page.contains("SALVAR"));
    }
}
