//! Rule-based reply generation.
//!
//! The support bot answers from a fixed, ordered keyword table: the incoming
//! text is lowercased and the first rule with a keyword occurring anywhere in
//! it wins. No state is kept between calls, so the same input always yields
//! the same reply.

/// Keyword rules in priority order. Earlier rows win.
const RULES: &[(&[&str], &str)] = &[
    (&["hello", "hi"], "Hello! How can I help you today?"),
    (
        &["help"],
        "I am a support bot. You can ask me about our services, pricing, or contact support.",
    ),
    (
        &["price", "pricing"],
        "Our basic plan starts at $10/month. Professional plan is $30/month.",
    ),
    (&["contact"], "You can reach us at support@example.com."),
    (&["bye"], "Goodbye! Have a nice day."),
];

/// Fallback when no keyword matches.
const FALLBACK: &str = "I'm sorry, I didn't understand that. Could you please rephrase?";

/// Produce the canned reply for a user message.
///
/// Matching is case-insensitive and substring-based ("HI there" and
/// "shipping" both contain a greeting keyword).
pub fn generate(content: &str) -> &'static str {
    let lowered = content.to_lowercase();
    for (keywords, reply) in RULES {
        if keywords.iter().any(|keyword| lowered.contains(keyword)) {
            return reply;
        }
    }
    FALLBACK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting() {
        assert_eq!(generate("hello"), "Hello! How can I help you today?");
        assert_eq!(generate("hi there"), "Hello! How can I help you today?");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(generate("HELLO"), generate("hello"));
        assert_eq!(generate("Hi"), generate("hi"));
    }

    #[test]
    fn test_help() {
        assert_eq!(
            generate("I need some help"),
            "I am a support bot. You can ask me about our services, pricing, or contact support."
        );
    }

    #[test]
    fn test_pricing_keywords() {
        let expected = "Our basic plan starts at $10/month. Professional plan is $30/month.";
        assert_eq!(generate("what is your price"), expected);
        assert_eq!(generate("tell me about pricing"), expected);
    }

    #[test]
    fn test_contact() {
        assert_eq!(
            generate("how do I contact you"),
            "You can reach us at support@example.com."
        );
    }

    #[test]
    fn test_bye() {
        assert_eq!(generate("ok bye"), "Goodbye! Have a nice day.");
    }

    #[test]
    fn test_fallback() {
        assert_eq!(
            generate("qwerty"),
            "I'm sorry, I didn't understand that. Could you please rephrase?"
        );
    }

    #[test]
    fn test_first_rule_wins() {
        // "hi" outranks "price" even though both keywords are present.
        assert_eq!(
            generate("hi, what is the price?"),
            "Hello! How can I help you today?"
        );
    }

    #[test]
    fn test_substring_match() {
        // "shipping" contains "hi"; substring semantics are intentional.
        assert_eq!(
            generate("question about shipping"),
            "Hello! How can I help you today?"
        );
    }

    #[test]
    fn test_deterministic() {
        let input = "do you have pricing info?";
        assert_eq!(generate(input), generate(input));
    }
}
