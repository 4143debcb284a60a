// Prompt templates for the text-enhancement gateway.
// Placeholders are `{name}` and are filled with `str::replace` before sending.

/// Summary rewrite. Replace: {draft}, {target_job}, {market}, {plain_text_only}
pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"Com base no seguinte comando/texto do usuário: "{draft}", gere um resumo profissional de alto impacto para a vaga de "{target_job}".
Use o estilo de CV Europeu (Europass).
{market}
Regras:
- Seja extremamente profissional.
- Foque em valor entregue e competências.
- Máximo de 4 frases.
- {plain_text_only}"#;

/// Experience rewrite. Replace: {description}, {role}, {plain_text_only}
pub const EXPERIENCE_PROMPT_TEMPLATE: &str = r#"Melhore o seguinte texto de experiência profissional para o cargo de "{role}".
Mantenha a veracidade dos fatos mas use uma linguagem mais executiva, focada em resultados e verbos de ação.
Retorne apenas o texto melhorado em Português. {plain_text_only}
Texto original: "{description}""#;

/// Skills rewrite. Replace: {skills}
pub const SKILLS_PROMPT_TEMPLATE: &str = r#"Dada a seguinte lista de habilidades: "{skills}", organize-as e reescreva-as de forma mais profissional para um currículo europeu.
Mantenha as competências originais mas use termos técnicos padrão de mercado.
Retorne apenas as habilidades separadas por vírgula em Português."#;

/// Cover letter. Replace: {full_name}, {target_job}, {personal_history},
/// {experiences}, {skills}, {plain_text_only}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Atue como um redator profissional de carreiras especializado no mercado Europeu. Escreva uma carta de apresentação (Cover Letter) completa, elegante e persuasiva de aproximadamente uma página para:

Candidato: {full_name}
Vaga Alvo: {target_job}
História Pessoal/Contexto: {personal_history}
Experiências principais: {experiences}
Principais competências: {skills}

Diretrizes de redação:
1. Estrutura Formal: Saudação, Introdução impactante, 2 a 3 parágrafos de desenvolvimento (conectando experiências com a vaga), 1 parágrafo sobre a motivação pessoal (usando a história fornecida) e Fechamento com chamada para ação.
2. Tom: Profissional, confiante e sóbrio. Evite clichês e exageros.
3. Adaptação Europeia: Mostre conhecimento sobre a importância da adaptação cultural e entrega de resultados.
4. Linguagem: Português formal.

Importante: Retorne apenas o corpo da carta, pronta para ser assinada. {plain_text_only}"#;

/// CV analysis. Replace: {target_job}, {summary}, {experiences}, {skills}, {market}
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analise este currículo para o mercado Europeu (vaga: {target_job}).
Resumo: {summary}
Experiências: {experiences}
Competências: {skills}

Forneça exatamente 4 sugestões de melhoria focadas em: palavras-chave do setor, métricas de sucesso, impacto e formatação.
IMPORTANTE: {market}

Retorne unicamente um JSON array de objetos: { "category": "keyword"|"metric"|"impact"|"style", "text": "sugestão", "reason": "motivo" }"#;

/// Placeholder used when the candidate left the personal history empty.
pub const MISSING_HISTORY: &str = "Não fornecido";

/// Target job used for the summary rewrite when none was given.
pub const DEFAULT_TARGET_JOB: &str = "profissional";
