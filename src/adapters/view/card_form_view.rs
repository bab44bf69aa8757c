//! Default card form markup.
//!
//! ```text
//! span.message
//! div.number   > label, input#paymentNumber[type=tel]
//! div.expiry   > label, input.expiryMonth#paymentExpiryMonth, input.expiryYear#paymentExpiryYear
//! div.cvc      > label, input#paymentCVC[type=tel][maxlength=4]   (only when collecting CVC)
//! ```
//!
//! Card inputs carry no `name` attribute so raw card data is never part
//! of a native form submission.

use crate::domain::widget::{Configuration, FieldKind, MESSAGE_CLASS};
use crate::ports::{ElementSpec, ViewRenderer};

/// Renders the stock card form.
#[derive(Debug, Clone, Default)]
pub struct CardFormView;

impl CardFormView {
    pub fn new() -> Self {
        Self
    }
}

fn label(kind: FieldKind, text: &str) -> ElementSpec {
    ElementSpec::new("label").attr("for", kind.element_id()).text(text)
}

fn tel_input(kind: FieldKind, placeholder: &str) -> ElementSpec {
    ElementSpec::new("input")
        .id(kind.element_id())
        .attr("type", "tel")
        .attr("placeholder", placeholder)
        .attr("required", "")
}

impl ViewRenderer for CardFormView {
    fn render_fields(&self, config: &Configuration) -> Vec<ElementSpec> {
        let mut markup = vec![
            ElementSpec::new("span").class(MESSAGE_CLASS),
            ElementSpec::new("div")
                .class("number")
                .child(label(FieldKind::Number, "Card number"))
                .child(tel_input(FieldKind::Number, "4242 4242 4242 4242").attr("autofocus", "")),
            ElementSpec::new("div")
                .class("expiry")
                .child(label(FieldKind::ExpiryMonth, "Expiry date (mm/yy)"))
                .child(tel_input(FieldKind::ExpiryMonth, "mm").class("expiryMonth"))
                .child(ElementSpec::new("span").text("/"))
                .child(tel_input(FieldKind::ExpiryYear, "yy").class("expiryYear")),
        ];

        if config.collect_cvc {
            markup.push(
                ElementSpec::new("div")
                    .class("cvc")
                    .child(label(FieldKind::Cvc, "Security code"))
                    .child(tel_input(FieldKind::Cvc, "123").attr("maxlength", "4")),
            );
        }

        markup
    }

    fn render_token(&self, field_name: &str, token_id: &str) -> ElementSpec {
        ElementSpec::new("input")
            .attr("type", "hidden")
            .attr("name", field_name)
            .value(token_id)
    }
}
