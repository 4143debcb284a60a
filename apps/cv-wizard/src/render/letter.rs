//! Cover-letter page. One fixed template regardless of the résumé layout.

use chrono::Local;

use crate::models::field_path::FieldPath;
use crate::models::profile::CandidateProfile;

use super::html::{slot, text_area};
use super::{name_slot, RenderContext};

pub(super) fn render(profile: &CandidateProfile, ctx: &RenderContext<'_>) -> String {
    let date = Local::now().format("%d/%m/%Y");
    let letter = profile.cover_letter.as_deref().unwrap_or_default();

    format!(
        r#"<header class="letter-head"><div class="sender">{name}<p class="contact-line">{email} • {phone}</p><div class="address-line">{address}, {city}</div></div><div class="date">{date}</div></header><section><p class="subject-label">Assunto</p><div class="subject"><span>Candidatura ao cargo de:</span>{target_job}</div></section><section class="letter-body">{body}</section><footer class="closing"><p class="closing-label">Atentamente,</p>{signature}<div class="signature-bar"></div></footer>"#,
        name = name_slot(profile, ctx, ""),
        email = slot(ctx, FieldPath::Email, &profile.email, "Email", ""),
        phone = slot(ctx, FieldPath::Phone, &profile.phone, "Telefone", ""),
        address = slot(ctx, FieldPath::Address, &profile.address, "Morada", ""),
        city = slot(ctx, FieldPath::City, &profile.city, "Cidade", ""),
        target_job = slot(ctx, FieldPath::TargetJob, &profile.target_job, "Cargo", ""),
        body = text_area(
            ctx,
            FieldPath::CoverLetter,
            letter,
            "Sua carta de apresentação...",
            ""
        ),
        signature = name_slot(profile, ctx, ""),
    )
}
