//! Builds the navigation tree out of the authored fragment.
//!
//! Every `build_*` step reads from the parsed fragment and produces
//! detached elements; nothing is mounted here.

use crate::dom::{Document, El, NodeId};
use crate::error::GnavError;

pub const BRAND_IMG: &str =
    r#"<img loading="lazy" alt="Adobe" src="/blocks/header/adobe-logo.svg">"#;

pub const SEARCH_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" focusable="false"><path d="M14 2A8 8 0 0 0 7.4 14.5L2.4 19.4a1.5 1.5 0 0 0 2.1 2.1L9.5 16.6A8 8 0 1 0 14 2Zm0 14.1A6.1 6.1 0 1 1 20.1 10 6.1 6.1 0 0 1 14 16.1Z"></path></svg>"#;

pub const HAS_MENU: &str = "has-Menu";
pub const SEARCH_BAR_ID: &str = "gnav-search-bar";

/// Size variant of a mega-menu, fixed at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuVariant {
    Small,
    Medium,
    Large,
}

impl MenuVariant {
    /// Classify by the number of child elements left after the heading
    /// was removed. `None` for an empty block.
    pub fn from_child_count(count: usize) -> Option<Self> {
        match count {
            0 => None,
            1 => Some(MenuVariant::Small),
            2 => Some(MenuVariant::Medium),
            _ => Some(MenuVariant::Large),
        }
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            MenuVariant::Small => "small-Variant",
            MenuVariant::Medium => "medium-Variant",
            MenuVariant::Large => "large-Variant",
        }
    }
}

/// The expandable panel of a nav item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    pub element: NodeId,
    pub id: String,
    pub variant: MenuVariant,
    /// Inner `gnav-menu-container`, large variant only.
    pub container: Option<NodeId>,
}

/// One top-level entry of the main navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub element: NodeId,
    /// The authored link, moved into the item.
    pub trigger: NodeId,
    pub menu: Option<Menu>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainNav {
    pub element: NodeId,
    pub items: Vec<NavItem>,
}

/// Built search panel and the nodes the controller wires events to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchPanel {
    pub element: NodeId,
    pub button: NodeId,
    pub bar: NodeId,
    pub input: NodeId,
    pub results: NodeId,
    pub advanced_link: Option<NodeId>,
}

/// Empty profile element plus the authored block it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileSlot {
    pub block: NodeId,
    pub element: NodeId,
}

/// Reads blocks out of a parsed fragment and builds nav elements.
pub struct MenuBuilder<'a> {
    doc: &'a mut Document,
    source: NodeId,
}

impl<'a> MenuBuilder<'a> {
    pub fn new(doc: &'a mut Document, source: NodeId) -> Self {
        Self { doc, source }
    }

    /// The mobile menu button.
    pub fn build_toggle(&mut self) -> NodeId {
        self.doc.create_el(
            El::new("button")
                .class("gnav-toggle")
                .attr("aria-label", "Navigation menu")
                .attr("aria-expanded", false),
        )
    }

    /// `.gnav-brand` block → brand link, optionally with the logo image.
    pub fn build_brand(&mut self) -> Result<Option<NodeId>, GnavError> {
        let Some(block) = self.doc.find(self.source, |el| el.has_class("gnav-brand")) else {
            return Ok(None);
        };
        let brand = self
            .doc
            .find(block, |el| el.is("a"))
            .ok_or_else(|| GnavError::missing(".gnav-brand a"))?;
        self.doc.add_class(brand, "gnav-brand");
        if self.doc.has_class(block, "with-logo") {
            self.prepend_html(brand, BRAND_IMG);
        }
        Ok(Some(brand))
    }

    /// `.adobe-logo a` → icon-only logo link labelled by its text.
    pub fn build_logo(&mut self) -> Option<NodeId> {
        let block = self.doc.find(self.source, |el| el.has_class("adobe-logo"))?;
        let logo = self.doc.find(block, |el| el.is("a"))?;
        self.doc.add_class(logo, "gnav-logo");
        let label = self.doc.text_content(logo).trim().to_string();
        self.doc.set_attr(logo, "aria-label", &label);
        self.doc.set_text_content(logo, "");
        self.prepend_html(logo, BRAND_IMG);
        Some(logo)
    }

    /// Every `h2 > a` becomes a nav item; its enclosing `div` becomes the
    /// item's menu. `None` when the fragment has no such links.
    pub fn build_main_nav(&mut self) -> Result<Option<MainNav>, GnavError> {
        let links = self.doc.find_all(self.source, |el| el.is("a"));
        let links: Vec<NodeId> = links
            .into_iter()
            .filter(|link| {
                self.doc
                    .parent(*link)
                    .and_then(|p| self.doc.element(p))
                    .is_some_and(|p| p.is("h2"))
            })
            .collect();
        if links.is_empty() {
            return Ok(None);
        }

        let element = self.doc.create_el(El::new("div").class("gnav-mainnav"));
        let mut items = Vec::with_capacity(links.len());
        for (idx, link) in links.into_iter().enumerate() {
            let item = self.build_nav_item(idx, link)?;
            self.doc.append(element, item.element);
            items.push(item);
        }
        Ok(Some(MainNav { element, items }))
    }

    fn build_nav_item(&mut self, idx: usize, link: NodeId) -> Result<NavItem, GnavError> {
        let block = self
            .doc
            .closest(link, |el| el.is("div"))
            .ok_or_else(|| GnavError::missing("div > h2 > a"))?;
        // The block's first heading goes, even when the link sits in a later one
        if let Some(heading) = self.doc.find(block, |el| el.is("h2")) {
            self.doc.detach(heading);
        }

        let element = self.doc.create_el(El::new("div").class("gnav-navitem"));
        self.doc.append(element, link);

        let Some(variant) = MenuVariant::from_child_count(self.doc.child_element_count(block))
        else {
            return Ok(NavItem {
                element,
                trigger: link,
                menu: None,
            });
        };

        let id = format!("navmenu-{}", idx);
        self.doc.set_attr(block, "id", &id);
        self.doc.add_class(element, HAS_MENU);
        self.doc.set_attr(link, "role", "button");
        self.doc.set_attr(link, "aria-expanded", "false");
        self.doc.set_attr(link, "aria-controls", &id);

        let menu = self.decorate_menu(block, id, variant);
        self.doc.append(element, menu.element);
        Ok(NavItem {
            element,
            trigger: link,
            menu: Some(menu),
        })
    }

    fn decorate_menu(&mut self, block: NodeId, id: String, variant: MenuVariant) -> Menu {
        self.doc.set_class_name(block, "gnav-navitem-menu");
        self.doc.add_class(block, variant.class_name());

        let container = (variant == MenuVariant::Large).then(|| {
            let container = self.doc.create_el(El::new("div").class("gnav-menu-container"));
            for child in self.doc.children(block).to_vec() {
                self.doc.append(container, child);
            }
            self.doc.append(block, container);
            container
        });

        Menu {
            element: block,
            id,
            variant,
            container,
        }
    }

    /// `.search` block → search button plus the search bar overlay.
    pub fn build_search(&mut self) -> Result<Option<SearchPanel>, GnavError> {
        let Some(block) = self.doc.find(self.source, |el| el.has_class("search")) else {
            return Ok(None);
        };
        let label_el = self
            .doc
            .find(block, |el| el.is("p"))
            .ok_or_else(|| GnavError::missing(".search p"))?;
        let label = self.doc.text_content(label_el).trim().to_string();
        let advanced_link = self.doc.find(block, |el| el.is("a"));

        let element = self.doc.create_el(El::new("div").class("gnav-search"));
        let button = self.doc.create_el(
            El::new("button")
                .class("gnav-search-button")
                .attr("aria-label", &label)
                .attr("aria-expanded", false)
                .attr("aria-controls", SEARCH_BAR_ID),
        );
        self.doc.insert_html(button, SEARCH_ICON);

        let bar = self
            .doc
            .create_el(El::new("aside").id(SEARCH_BAR_ID).class("gnav-search-bar"));
        let field = self.doc.create_el(El::new("div").class("gnav-search-field"));
        self.doc.insert_html(field, SEARCH_ICON);
        let input = self.doc.create_el(
            El::new("input")
                .class("gnav-search-input")
                .attr("placeholder", &label),
        );
        let results = self.doc.create_el(El::new("div").class("gnav-search-results"));

        self.doc.append(field, input);
        if let Some(link) = advanced_link {
            self.doc.append(field, link);
        }
        self.doc.append(bar, field);
        self.doc.append(bar, results);
        self.doc.append(element, button);
        self.doc.append(element, bar);

        Ok(Some(SearchPanel {
            element,
            button,
            bar,
            input,
            results,
            advanced_link,
        }))
    }

    /// `.profile` block → empty `gnav-profile` element, filled once the
    /// identity provider is ready.
    pub fn build_profile(&mut self) -> Option<ProfileSlot> {
        let block = self.doc.find(self.source, |el| el.has_class("profile"))?;
        let element = self.doc.create_el(El::new("div").class("gnav-profile"));
        Some(ProfileSlot { block, element })
    }

    fn prepend_html(&mut self, parent: NodeId, markup: &str) {
        let holder = self.doc.parse_fragment(markup);
        for child in self.doc.children(holder).to_vec().into_iter().rev() {
            self.doc.prepend(parent, child);
        }
    }
}
