//! Markup generation for every page.
//!
//! Renderers are pure: typed data in, `Markup` out. All interpolated text is
//! HTML-escaped by Maud; only the Markdown output of the join page is
//! inserted pre-rendered.
//!
//! Interactive elements carry `data-*` attributes instead of inline
//! handlers; the web layer picks them up with one delegated listener:
//! - `data-nav="<page>"`: navigate to a page
//! - `data-carousel-step="<delta>"`: step the news carousel
//! - `data-member-id="<id>"`: open a team member's profile
//! - `data-modal-close`: close the profile

pub mod contact;
pub mod home;
pub mod join;
pub mod publications;
pub mod research;
pub mod team;

use maud::{html, Markup};

use crate::page::PageId;

/// Base directory of images referenced by data files.
pub const IMAGE_ROOT: &str = "data";

/// Wide page container with a large underlined title.
pub(crate) fn page_shell(title: &str, body: Markup) -> Markup {
    html! {
        div class="py-10 max-w-7xl mx-auto px-4 sm:px-6 lg:px-8" {
            h2 class="text-4xl font-extrabold text-gray-900 mb-10 border-b-4 pb-3 border-gray-500" {
                (title)
            }
            (body)
        }
    }
}

/// In-page link to another page.
pub(crate) fn page_link(page: PageId, class: &str, label: Markup) -> Markup {
    html! {
        a href=(format!("#{}", page.hash())) data-nav=(page.token()) class=(class) { (label) }
    }
}

/// Path of an image shipped with a data resource.
pub(crate) fn image_path(section: &str, file: &str) -> String {
    format!("{}/{}/images/{}", IMAGE_ROOT, section, file)
}

/// Inline fallback that swaps a broken image for a placeholder.
pub(crate) fn image_fallback(placeholder_url: &str) -> String {
    format!(
        "this.onerror=null; this.src='{}'",
        placeholder_url.replace('\'', "%27")
    )
}

/// Message shown when a data file is empty or missing.
pub(crate) fn empty_notice(title: &str, what: &str, path: &str) -> Markup {
    html! {
        h2 class="text-3xl font-bold text-gray-900 mb-6" { (title) }
        p {
            "No " (what) ". Please populate the "
            code { (path) }
            " file."
        }
    }
}
