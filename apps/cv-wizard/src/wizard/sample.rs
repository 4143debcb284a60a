//! Fixed, fully populated profile used by the quick-test shortcut.
//! Includes a pre-written cover letter and four suggestions so the preview is
//! complete without any gateway call.

use crate::models::profile::{
    CandidateProfile, CvLayout, Education, Experience, LanguageProficiency, Suggestion,
    SuggestionCategory,
};

const SAMPLE_COVER_LETTER: &str = "Exmo.(a) Sr.(a) Responsável pela Seleção,

É com grande entusiasmo que submeto a minha candidatura para a posição de Head of Supply Chain, conforme anunciado pela Workly. Com mais de 12 anos de experiência na gestão de cadeias de suprimentos complexas e um histórico comprovado de otimização operacional, estou confiante de que possuo as competências necessárias para agregar valor imediato à sua organização.

Atualmente, como Diretor de Operações na Logística Global Portugal, gerencio três centros de distribuição nacionais e lidero uma equipe de 150 colaboradores. Durante o meu mandato, implementei metodologias Lean que resultaram numa redução de 20% no tempo de expedição e uma economia de 12% nos custos anuais de transporte. Minha experiência anterior na AutoParts Brasil também me permitiu digitalizar processos críticos, garantindo 100% de visibilidade de inventário através de sistemas ERP de última geração.

Minha trajetória pessoal, iniciada como ajudante de armazém, concedeu-me uma visão holística e resiliente da logística. Entendo profundamente os desafios do \"chão de fábrica\" tanto quanto a importância das decisões estratégicas de alto nível. Mudei-me para Portugal precisamente para aplicar esta visão bicultural e adaptativa no mercado europeu, onde a eficiência e a agilidade são diferenciais competitivos.

Acredito que minha combinação de competências técnicas em SAP S/4HANA e Power BI, aliada a uma liderança focada em resultados humanos e operacionais, faz de mim o candidato ideal para elevar o padrão da sua logística.

Estou ansioso pela oportunidade de discutir como minha experiência pode contribuir para o sucesso contínuo da vossa empresa em uma entrevista.

Atentamente,
Ricardo Oliveira Machado";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn language(id: &str, name: &str, level: &str) -> LanguageProficiency {
    LanguageProficiency {
        id: id.to_string(),
        name: name.to_string(),
        level: level.to_string(),
    }
}

fn suggestion(category: SuggestionCategory, text: &str, reason: &str) -> Suggestion {
    Suggestion {
        category,
        text: text.to_string(),
        reason: reason.to_string(),
    }
}

pub fn sample_profile() -> CandidateProfile {
    CandidateProfile {
        full_name: "Ricardo Oliveira Machado".into(),
        email: "ricardo.machado@email.com".into(),
        phone: "+351 912 345 678".into(),
        address: "Avenida da Liberdade, 123".into(),
        nationality: "Brasileira".into(),
        profession: "Gerente de Operações Logísticas".into(),
        city: "Lisboa".into(),
        profile_photo:
            "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?fit=crop&w=300&h=400"
                .into(),
        summary: "Gestor de Operações com mais de 12 anos de experiência consolidada no setor \
            automotivo e varejo em larga escala. Especialista na otimização de cadeias de \
            suprimentos complexas e liderança de equipas multiculturais. Focado na redução de \
            custos operacionais e implementação de sistemas ERP/WMS de última geração."
            .into(),
        personal_history: "Minha jornada começou como ajudante de armazém no interior do \
            Brasil, onde aprendi o valor da disciplina e da eficiência operacional. Com o tempo, \
            essa paixão por processos me levou a multinacionais, onde liderei transformações \
            digitais críticas. Mudei-me para Portugal com o objetivo de conectar minha vasta \
            experiência em mercados emergentes com as demandas dinâmicas da logística europeia."
            .into(),
        experiences: vec![
            Experience {
                id: "1".into(),
                company: "Logística Global Portugal".into(),
                role: "Diretor de Operações".into(),
                start_date: "Jan 2018".into(),
                end_date: "Presente".into(),
                description: "Responsável pela gestão de 3 centros de distribuição nacionais e \
                    liderança de 150 colaboradores. Implementação de metodologia Lean que reduziu \
                    o tempo de expedição em 20%."
                    .into(),
                achievements: "Redução de 12% nos custos de transporte no primeiro ano.".into(),
            },
            Experience {
                id: "2".into(),
                company: "AutoParts Brasil".into(),
                role: "Gerente de Logística".into(),
                start_date: "Mar 2012".into(),
                end_date: "Dez 2017".into(),
                description: "Gestão de inventário e coordenação de importações/exportações. \
                    Supervisão de frotas próprias e terceirizadas."
                    .into(),
                achievements: "Digitalização de 100% dos processos de armazém.".into(),
            },
        ],
        education: vec![Education {
            id: "edu1".into(),
            institution: "Universidade de Coimbra".into(),
            degree: "Mestrado em Gestão de Cadeia de Suprimentos".into(),
            start_date: "2018".into(),
            end_date: "2020".into(),
        }],
        skills: strings(&[
            "SAP S/4HANA",
            "Gestão de Frotas",
            "Metodologia Lean",
            "Estratégia de Sourcing",
            "Power BI",
        ]),
        qualities: strings(&["Liderança Resiliente", "Visão Estratégica", "Negociação"]),
        languages: vec![
            language("lang1", "Português", "Nativo"),
            language("lang2", "Inglês", "C1"),
            language("lang3", "Espanhol", "B2"),
        ],
        target_job: "Head of Supply Chain".into(),
        cover_letter: Some(SAMPLE_COVER_LETTER.to_string()),
        ai_suggestions: Some(vec![
            suggestion(
                SuggestionCategory::Metric,
                "Adicione mais números nas conquistas",
                "Recrutadores europeus focam em resultados mensuráveis.",
            ),
            suggestion(
                SuggestionCategory::Keyword,
                "Use termos como \"Green Logistics\"",
                "Sustentabilidade é uma tendência forte na Europa.",
            ),
            suggestion(
                SuggestionCategory::Style,
                "Mantenha o tom sóbrio do Europass",
                "A formalidade é valorizada em cargos de gerência.",
            ),
            suggestion(
                SuggestionCategory::Impact,
                "Destaque o Mestrado em Coimbra",
                "Educação em instituições locais gera confiança imediata.",
            ),
        ]),
        layout: CvLayout::Europass,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::SUGGESTION_COUNT;

    #[test]
    fn test_sample_is_fully_populated() {
        let profile = sample_profile();
        assert!(!profile.full_name.is_empty());
        assert_eq!(profile.layout, CvLayout::Europass);
        assert!(profile.cover_letter.as_deref().is_some_and(|l| !l.is_empty()));
        assert_eq!(
            profile.ai_suggestions.as_ref().map(Vec::len),
            Some(SUGGESTION_COUNT)
        );
        assert_eq!(profile.experiences.len(), 2);
        assert_eq!(profile.languages.len(), 3);
    }

    #[test]
    fn test_sample_row_ids_are_unique() {
        let profile = sample_profile();
        let mut ids: Vec<&str> = profile
            .experiences
            .iter()
            .map(|e| e.id.as_str())
            .chain(profile.education.iter().map(|e| e.id.as_str()))
            .chain(profile.languages.iter().map(|l| l.id.as_str()))
            .collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }
}
