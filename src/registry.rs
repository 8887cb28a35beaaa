//! Page render strategies.
//!
//! Each page maps to one strategy that pulls whatever data it needs from
//! the `DataStore` and hands it to the matching renderer.

use std::cell::RefCell;
use std::rc::Rc;

use maud::Markup;
use thiserror::Error;

use crate::config::SiteConfig;
use crate::data::model::{HomeContent, Member, Publication};
use crate::data::{
    DataStore, DecodeError, FetchOutcome, Resource, ResourceKey, ResourceValue, Transport,
};
use crate::page::PageId;
use crate::render::join::JoinContent;
use crate::render::team::TeamRoster;
use crate::render::{contact, home, join, publications, research, team};
use crate::timer::Sleeper;

/// A page could not be rendered.
#[derive(Debug, Error)]
pub enum RenderFault {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("{0}")]
    Unexpected(String),
}

/// Maps pages to their render strategies.
pub struct PageRegistry<T, S> {
    store: Rc<DataStore<T, S>>,
    config: Rc<SiteConfig>,
    roster: RefCell<TeamRoster>,
}

impl<T: Transport, S: Sleeper> PageRegistry<T, S> {
    pub fn new(store: Rc<DataStore<T, S>>, config: Rc<SiteConfig>) -> Self {
        Self {
            store,
            config,
            roster: RefCell::new(TeamRoster::default()),
        }
    }

    /// Renders `page`, fetching its data as needed.
    pub async fn render(&self, page: PageId) -> Result<Markup, RenderFault> {
        match page {
            PageId::Home => self.render_home().await,
            PageId::Team => self.render_team().await,
            PageId::Research => Ok(research::render_research()),
            PageId::Publications => self.render_publications().await,
            PageId::Join => self.render_join().await,
            PageId::Contact => Ok(contact::render_contact(&self.config.contact)),
        }
    }

    /// Profile of a member from the most recently rendered team page.
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))] // Opened from the team modal handler
    pub fn member_detail(&self, member_id: &str) -> Option<Markup> {
        let roster = self.roster.borrow();
        let member = roster.find(member_id);
        if member.is_none() {
            log::warn!("No team member with id {}", member_id);
        }
        member.map(team::render_member_detail)
    }

    fn resource(&self, key: ResourceKey) -> Resource {
        self.config.resources.resource(key)
    }

    async fn render_home(&self) -> Result<Markup, RenderFault> {
        let content: HomeContent = self
            .store
            .fetch_records(&self.resource(ResourceKey::Home))
            .await?;
        Ok(home::render_home(&content, &self.config.lab_name))
    }

    async fn render_team(&self) -> Result<Markup, RenderFault> {
        let resource = self.resource(ResourceKey::Team);
        *self.roster.borrow_mut() = TeamRoster::default();

        let members: Vec<Member> = self.store.fetch_records(&resource).await?;
        let roster = TeamRoster::from_members(members);
        let markup = team::render_team(&roster, &resource.path);
        *self.roster.borrow_mut() = roster;
        Ok(markup)
    }

    async fn render_publications(&self) -> Result<Markup, RenderFault> {
        let resource = self.resource(ResourceKey::Publications);
        let publications: Vec<Publication> = self.store.fetch_records(&resource).await?;
        Ok(publications::render_publications(
            &publications,
            &resource.path,
        ))
    }

    async fn render_join(&self) -> Result<Markup, RenderFault> {
        let resource = self.resource(ResourceKey::Join);
        let markup = match self.store.fetch_outcome(&resource).await {
            FetchOutcome::Loaded(ResourceValue::Text(source)) => {
                join::render_join(JoinContent::Markdown(&source))
            }
            FetchOutcome::Loaded(ResourceValue::Json(_)) => {
                return Err(RenderFault::Unexpected(format!(
                    "{} resolved to JSON",
                    resource.key
                )))
            }
            FetchOutcome::NotFound => join::render_join(JoinContent::Missing),
            FetchOutcome::Exhausted => join::render_join(JoinContent::Unavailable),
        };
        Ok(markup)
    }
}
