//! KakaoTalk export cleanup. A plain stateless transform: the gateway runs
//! it over the raw export before the transcript reaches the chat builder.

use std::sync::OnceLock;

use regex::Regex;

fn timestamp_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[\d{4}/\d{2}/\d{2} \d{2}:\d{2}\]").expect("valid pattern"))
}

fn speaker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\s*\w+\s*:\s*").expect("valid pattern"))
}

fn system_phrase_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"님이\s*보낸\s*(메시지|사진)").expect("valid pattern"))
}

/// Strip bracketed timestamps, leading `speaker:` prefixes and the two
/// KakaoTalk system phrases. Everything else is preserved verbatim.
pub fn clean_kakao_transcript(chat_text: &str) -> String {
    let cleaned = timestamp_re().replace_all(chat_text, "");
    let cleaned = speaker_re().replace_all(&cleaned, "");
    let cleaned = system_phrase_re().replace_all(&cleaned, "");
    cleaned.trim().to_string()
}
