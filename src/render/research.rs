//! Research page placeholder.
//!
//! The research resource is declared but its content model has not been
//! settled, so the page states that plainly instead of guessing.

use maud::{html, Markup};

use super::{page_link, page_shell};
use crate::page::PageId;

pub fn render_research() -> Markup {
    page_shell(
        "Research",
        html! {
            p class="text-gray-700" { "Research overview is not yet available." }
            p class="mt-4" {
                "In the meantime, browse our "
                (page_link(PageId::Publications, "text-blue-600 hover:underline font-medium", html! { "publications" }))
                "."
            }
        },
    )
}
