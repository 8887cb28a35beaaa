//! Home page: welcome, hero image, about blurb, open positions, news and
//! sponsors.

use std::cmp::Reverse;

use maud::{html, Markup};

use super::{image_fallback, image_path, page_link};
use crate::data::model::{HomeContent, NewsItem, Sponsor};
use crate::page::PageId;

/// Id of the carousel container; slides are its `.news-slide` children.
pub const CAROUSEL_ID: &str = "news-carousel";
pub const SLIDE_CLASS: &str = "news-slide";

const ABOUT_TEXT: &str = "We aim to advance research in computer vision, robotics, and medical \
imaging. Over the past few years, we have made significant progress in these fields through our \
cutting-edge research and collaboration with leading experts in the field. Our work has resulted \
in numerous publications in top-tier conferences and journals, and we continue to push the \
boundaries of what is possible with our advanced machine learning techniques, particularly in the \
areas of deep neural networks. We are excited to continue our research and contribute to the \
field of computer vision, robotics, and medical imaging.";

/// News items newest first.
///
/// Items with unparseable dates go last, keeping their original order.
pub fn sort_news(news: &[NewsItem]) -> Vec<&NewsItem> {
    let mut sorted: Vec<&NewsItem> = news.iter().collect();
    sorted.sort_by_key(|item| match item.parsed_date() {
        Some(date) => (0, Reverse(Some(date))),
        None => (1, Reverse(None)),
    });
    sorted
}

pub fn render_home(content: &HomeContent, lab_name: &str) -> Markup {
    let news = sort_news(&content.news);

    html! {
        h1 class="text-4xl md:text-3xl font-medium text-gray-900 mb-5 leading-tight" {
            "Welcome to the " (lab_name)
        }

        div class="relative bg-gray-900 rounded-xl shadow-lg overflow-hidden mb-6 h-[350px] md:h-[450px] flex items-center justify-center" {
            img class="w-full h-full object-cover"
                src=(image_path("home", "lab_pic.jpg"))
                alt="Lab Main Photo"
                onerror=(image_fallback("https://placehold.co/1200x450/374151/D1D5DB?text=Lab+Image"));
        }

        div class="mb-6 p-8 bg-gray-50 rounded-xl border border-gray-200" {
            h2 class="text-3xl font-bold text-gray-900 mb-4" { "Who we are" }
            p class="text-gray-700 leading-relaxed mb-4" { (ABOUT_TEXT) }
            (page_link(
                PageId::Research,
                "text-blue-600 hover:underline font-medium inline-block",
                html! { "Learn more about our research →" },
            ))
        }

        @if content.has_open_positions {
            div class="mb-6 p-4 text-center bg-yellow-100 text-yellow-800 border-l-4 border-yellow-500 rounded-lg shadow-inner" {
                p class="font-medium" {
                    "We are currently accepting applications! "
                    (page_link(
                        PageId::Join,
                        "underline hover:text-yellow-900 font-bold",
                        html! { "See open positions →" },
                    ))
                }
            }
        }

        (render_news_carousel(&news))
        (render_sponsors(&content.sponsors))
    }
}

fn render_news_carousel(news: &[&NewsItem]) -> Markup {
    if news.is_empty() {
        return html! {};
    }

    html! {
        div id=(CAROUSEL_ID) class="bg-white rounded-xl shadow-lg mb-8 relative overflow-hidden border-t-4 border-gray-500" {
            h2 class="text-3xl font-bold text-gray-900 text-center pt-6" { "Latest News" }
            div id="news-slides-container" class="min-h-[250px] flex items-center" {
                @for (index, item) in news.iter().enumerate() {
                    (render_news_slide(index, item))
                }
            }
            button type="button" data-carousel-step="-1"
                class="absolute left-0 top-1/2 transform -translate-y-1/2 bg-gray-900 text-white p-3 rounded-r-lg opacity-70 hover:opacity-100 z-20" {
                "<"
            }
            button type="button" data-carousel-step="1"
                class="absolute right-0 top-1/2 transform -translate-y-1/2 bg-gray-900 text-white p-3 rounded-l-lg opacity-70 hover:opacity-100 z-20" {
                ">"
            }
        }
    }
}

fn render_news_slide(index: usize, item: &NewsItem) -> Markup {
    let image = item.image.as_deref().filter(|i| !i.is_empty()).unwrap_or("default.jpg");
    let hidden = (index != 0).then_some("display: none;");

    html! {
        div class={ (SLIDE_CLASS) " p-5 transition-opacity duration-700 ease-in-out" } data-index=(index) style=[hidden] {
            div class="flex flex-col md:flex-row items-center md:space-x-8" {
                div class="flex-shrink-0 w-full md:w-1/3 mb-4 md:mb-0" {
                    img class="w-full h-48 object-contain bg-white border border-gray-200 rounded-lg shadow-md"
                        src=(image_path("home", image))
                        alt=(item.title)
                        onerror=(image_fallback("https://placehold.co/400x192/f3f4f6/6b7280?text=NEWS"));
                }
                div class="md:w-2/3" {
                    p class="text-sm font-medium text-gray-600 uppercase mb-2" { (item.display_date()) }
                    h3 class="text-2xl font-bold text-gray-900 mb-2" { (item.title) }
                    p class="text-gray-700" { (item.summary) }
                    @if let Some(link) = item.link.as_deref().filter(|l| !l.is_empty()) {
                        a href=(link) target="_blank" rel="noopener"
                            class="text-blue-600 hover:underline font-medium mt-3 inline-block" {
                            "Read more →"
                        }
                    }
                }
            }
        }
    }
}

fn render_sponsors(sponsors: &[Sponsor]) -> Markup {
    if sponsors.is_empty() {
        return html! {};
    }

    html! {
        div class="mt-16 pt-8 border-t border-gray-200" {
            h2 class="text-2xl font-bold text-center text-gray-700 mb-8" { "Our Sponsors & Affiliations" }
            div class="grid grid-cols-2 sm:grid-cols-3 md:grid-cols-5 gap-2" {
                @for sponsor in sponsors {
                    div class="p-4 flex items-center justify-center" {
                        img src=(image_path("home", &sponsor.logo))
                            alt=(format!("{} Logo", sponsor.name))
                            class="h-16 w-auto object-contain"
                            onerror=(image_fallback("https://placehold.co/120x64/f3f4f6/6b7280?text=LOGO"));
                    }
                }
            }
        }
    }
}
