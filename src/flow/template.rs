//! Message template resolution — pure `{{token}}` substitution.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::slots::{Slot, SlotValues};

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{([a-z_]+)\}\}").unwrap());

/// Token that resolves to the fixed business name.
const SHOP_TOKEN: &str = "shop";

/// Resolve `{{token}}` placeholders in a message template.
///
/// Slot tokens resolve to the slot's current value (empty string when the
/// slot is unset); `{{shop}}` resolves to the business name. Unknown tokens
/// are left verbatim: this is a permissive substitution, not a validation
/// pass.
pub fn render(template: &str, slots: &SlotValues, shop_name: &str) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            let token = &caps[1];
            if token == SHOP_TOKEN {
                return shop_name.to_string();
            }
            match Slot::from_token(token) {
                Some(slot) => slots.get(slot).to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_unchanged() {
        let slots = SlotValues::default();
        assert_eq!(render("Tudo certo!", &slots, "Loja"), "Tudo certo!");
    }

    #[test]
    fn slot_token_resolves_to_value() {
        let mut slots = SlotValues::default();
        slots.set(Slot::Name, "Ana");
        assert_eq!(render("Tudo bem {{name}}?", &slots, ""), "Tudo bem Ana?");
    }

    #[test]
    fn unset_slot_resolves_to_empty_string() {
        let slots = SlotValues::default();
        assert_eq!(render("Tudo bem {{name}}?", &slots, ""), "Tudo bem ?");
    }

    #[test]
    fn shop_token_resolves_to_business_name() {
        let slots = SlotValues::default();
        assert_eq!(
            render("Sou o assistente do(a) {{shop}}.", &slots, "Barbearia Central"),
            "Sou o assistente do(a) Barbearia Central."
        );
    }

    #[test]
    fn unknown_token_is_left_verbatim() {
        let slots = SlotValues::default();
        assert_eq!(render("Olá {{cliente}}!", &slots, "Loja"), "Olá {{cliente}}!");
    }

    #[test]
    fn multiple_occurrences_all_resolve() {
        let mut slots = SlotValues::default();
        slots.set(Slot::Name, "Ana");
        assert_eq!(
            render("{{name}}, {{name}} e {{shop}}", &slots, "Loja"),
            "Ana, Ana e Loja"
        );
    }

    #[test]
    fn rendering_is_idempotent() {
        let mut slots = SlotValues::default();
        slots.set(Slot::Service, "Barba");
        let template = "Serviço: {{service}} em {{shop}} ({{desconhecido}})";
        let once = render(template, &slots, "Loja");
        let twice = render(&once, &slots, "Loja");
        assert_eq!(once, twice);
    }
}
