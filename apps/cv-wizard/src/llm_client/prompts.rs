// Shared prompt fragments. Each gateway operation defines its own template in
// gateway/prompts.rs; this file holds the instructions they all repeat.

/// Appended to every free-text rewrite so the model answers with the text only.
pub const PLAIN_TEXT_ONLY: &str = "Não use introduções como \"Aqui está o texto\" nem \
    comentários adicionais. Retorne apenas o texto final.";

/// Market and language framing shared by every prompt.
pub const EUROPEAN_MARKET: &str = "O candidato procura trabalho no mercado europeu. \
    Todo o texto deve estar estritamente em Português.";
