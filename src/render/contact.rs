//! Static contact page.

use maud::{html, Markup};

use crate::config::ContactInfo;

pub fn render_contact(contact: &ContactInfo) -> Markup {
    html! {
        h2 class="text-4xl font-bold text-gray-900 mb-8 border-b-2 pb-2 border-gray-200" { "Contact Us" }
        div class="grid md:grid-cols-2 gap-8 bg-white p-8 rounded-xl shadow-lg" {
            div {
                h3 class="text-2xl font-semibold text-gray-900 mb-4" { "Visit" }
                p class="text-gray-700" {
                    @for (i, line) in contact.address.iter().enumerate() {
                        @if i > 0 { br; }
                        (line)
                    }
                }
            }
            div {
                h3 class="text-2xl font-semibold text-gray-900 mb-4" { "Get in touch" }
                p class="mb-2" {
                    span class="font-medium text-gray-700" { "Email: " }
                    a href=(format!("mailto:{}", contact.email)) class="text-blue-600 hover:underline" {
                        (contact.email)
                    }
                }
                @if let Some(phone) = &contact.phone {
                    p {
                        span class="font-medium text-gray-700" { "Phone: " }
                        (phone)
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_card() {
        let contact = ContactInfo {
            email: "lab@uni.edu".into(),
            address: vec!["Building 1".into(), "Room 42".into()],
            phone: Some("+1 555 0100".into()),
        };
        let html = render_contact(&contact).into_string();

        assert!(html.contains("mailto:lab@uni.edu"));
        assert!(html.contains("Building 1<br>Room 42"));
        assert!(html.contains("+1 555 0100"));
    }

    #[test]
    fn test_default_contact_has_no_phone() {
        let html = render_contact(&ContactInfo::default()).into_string();
        assert!(html.contains("info@researchgroup.edu"));
        assert!(!html.contains("Phone:"));
    }
}
