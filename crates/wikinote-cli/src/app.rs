use anyhow::Result;
use ratatui::widgets::ListState;
use std::path::{Path, PathBuf};
use wikinote_engine::{
    PageId, ParseOptions, Segment, TitleIndex, WikiId, WikiStore, io, markup, resolve,
};

/// A page as listed in the side panel.
pub struct PageEntry {
    pub id: PageId,
    pub title: String,
}

/// Browser state: which page is shown, which link has focus, and where
/// `Backspace` goes. Kept apart from drawing so navigation is testable.
pub struct App {
    wiki_path: PathBuf,
    options: ParseOptions,
    store: WikiStore,
    wiki: WikiId,
    titles: TitleIndex<PageId>,
    pages: Vec<PageEntry>,
    pub page_list_state: ListState,
    current: Option<PageId>,
    segments: Vec<Segment>,
    /// Index into `segments` of the focused link.
    focused_link: Option<usize>,
    history: Vec<PageId>,
    status: Option<String>,
}

impl App {
    pub fn new(wiki_path: PathBuf, options: ParseOptions) -> Result<Self> {
        let (store, wiki) = Self::load(&wiki_path)?;

        let mut app = Self {
            wiki_path,
            options,
            store,
            wiki,
            titles: TitleIndex::new(),
            pages: Vec::new(),
            page_list_state: ListState::default(),
            current: None,
            segments: Vec::new(),
            focused_link: None,
            history: Vec::new(),
            status: None,
        };
        app.refresh_listing()?;

        // Select first page if available
        if !app.pages.is_empty() {
            app.page_list_state.select(Some(0));
            app.update_content_for_selection();
        }

        Ok(app)
    }

    fn load(wiki_path: &Path) -> Result<(WikiStore, WikiId)> {
        let mut store = WikiStore::new();
        let wiki = io::load_wiki_dir(&mut store, wiki_path)?;
        Ok((store, wiki))
    }

    /// Rebuilds the page list and title index from the store.
    fn refresh_listing(&mut self) -> Result<()> {
        self.titles = self.store.title_index(self.wiki)?;
        self.pages = self
            .store
            .search_pages(self.wiki, "")?
            .into_iter()
            .map(|page| PageEntry {
                id: page.id,
                title: page.title.clone(),
            })
            .collect();
        Ok(())
    }

    /// Re-reads the wiki folder, staying on the current page if its title
    /// still exists.
    pub fn reload(&mut self) -> Result<()> {
        let previous_title = self.current_title().map(str::to_string);
        let (store, wiki) = Self::load(&self.wiki_path)?;
        self.store = store;
        self.wiki = wiki;
        self.history.clear();
        self.current = None;
        self.segments.clear();
        self.focused_link = None;
        self.refresh_listing()?;

        let index = previous_title
            .and_then(|title| self.pages.iter().position(|p| p.title == title))
            .or(if self.pages.is_empty() { None } else { Some(0) });
        self.page_list_state.select(index);
        self.update_content_for_selection();
        Ok(())
    }

    pub fn wiki_name(&self) -> &str {
        self.store
            .wiki(self.wiki)
            .map(|w| w.name.as_str())
            .unwrap_or_default()
    }

    pub fn pages(&self) -> &[PageEntry] {
        &self.pages
    }

    pub fn current_title(&self) -> Option<&str> {
        let id = self.current?;
        self.store.page(self.wiki, id).map(|p| p.title.as_str())
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn focused_link(&self) -> Option<usize> {
        self.focused_link
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn next_page(&mut self) {
        if self.pages.is_empty() {
            return;
        }
        let i = match self.page_list_state.selected() {
            Some(i) => (i + 1) % self.pages.len(),
            None => 0,
        };
        self.page_list_state.select(Some(i));
        self.update_content_for_selection();
    }

    pub fn previous_page(&mut self) {
        if self.pages.is_empty() {
            return;
        }
        let i = match self.page_list_state.selected() {
            Some(0) | None => self.pages.len() - 1,
            Some(i) => i - 1,
        };
        self.page_list_state.select(Some(i));
        self.update_content_for_selection();
    }

    fn update_content_for_selection(&mut self) {
        if let Some(index) = self.page_list_state.selected()
            && let Some(entry) = self.pages.get(index)
        {
            let id = entry.id;
            self.show_page(id);
        }
    }

    fn show_page(&mut self, id: PageId) {
        self.current = Some(id);
        self.segments = match self.store.page(self.wiki, id) {
            Some(page) => markup::parse_with(&page.content, &self.options),
            None => Vec::new(),
        };
        self.focused_link = None;
        self.status = None;
        if let Some(index) = self.pages.iter().position(|p| p.id == id) {
            self.page_list_state.select(Some(index));
        }
    }

    /// Links a reader can see; a link with an empty label draws nothing.
    fn link_positions(&self) -> Vec<usize> {
        self.segments
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_link() && !s.display_text().is_empty())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn focus_next_link(&mut self) {
        let links = self.link_positions();
        let next = match self.focused_link {
            Some(cur) => links.iter().find(|&&i| i > cur).or(links.first()),
            None => links.first(),
        };
        self.focused_link = next.copied();
    }

    pub fn focus_previous_link(&mut self) {
        let links = self.link_positions();
        let previous = match self.focused_link {
            Some(cur) => links.iter().rev().find(|&&i| i < cur).or(links.last()),
            None => links.last(),
        };
        self.focused_link = previous.copied();
    }

    /// Opens the page the focused link points at, or reports that it does
    /// not exist.
    pub fn follow_focused_link(&mut self) {
        let Some(target) = self
            .focused_link
            .and_then(|i| self.segments.get(i))
            .and_then(Segment::target)
            .map(str::to_string)
        else {
            return;
        };

        match resolve(&target, &self.titles).into_result(&target).copied() {
            Ok(id) => {
                if let Some(current) = self.current {
                    self.history.push(current);
                }
                self.show_page(id);
            }
            Err(err) => self.status = Some(err.to_string()),
        }
    }

    /// Returns to the page the last followed link was on.
    pub fn back(&mut self) {
        if let Some(previous) = self.history.pop() {
            self.show_page(previous);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;
    use wikinote_engine::UnterminatedLink;

    fn wiki_dir() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("Home.md"),
            "Go to [[Other]] or [[Missing|nowhere]]",
        )
        .unwrap();
        fs::write(dir.path().join("Other.md"), "Back [[Home|home]]").unwrap();
        dir
    }

    fn app(dir: &TempDir) -> App {
        App::new(dir.path().to_path_buf(), ParseOptions::default()).unwrap()
    }

    #[test]
    fn opens_first_page_by_title() {
        let dir = wiki_dir();
        let app = app(&dir);

        assert_eq!(app.pages().len(), 2);
        assert_eq!(app.current_title(), Some("Home"));
        assert_eq!(app.page_list_state.selected(), Some(0));
        assert_eq!(app.segments()[1], Segment::link("Other", "Other"));
    }

    #[test]
    fn page_selection_wraps() {
        let dir = wiki_dir();
        let mut app = app(&dir);

        app.next_page();
        assert_eq!(app.current_title(), Some("Other"));
        app.next_page();
        assert_eq!(app.current_title(), Some("Home"));
        app.previous_page();
        assert_eq!(app.current_title(), Some("Other"));
    }

    #[test]
    fn link_focus_cycles_over_links_only() {
        let dir = wiki_dir();
        let mut app = app(&dir);

        assert_eq!(app.focused_link(), None);
        app.focus_next_link();
        assert_eq!(app.focused_link(), Some(1));
        app.focus_next_link();
        assert_eq!(app.focused_link(), Some(3));
        app.focus_next_link();
        assert_eq!(app.focused_link(), Some(1));
        app.focus_previous_link();
        assert_eq!(app.focused_link(), Some(3));
    }

    #[test]
    fn link_focus_skips_links_with_empty_labels() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Home.md"), "[[Hidden|]] then [[Home|me]]").unwrap();
        let mut app = app(&dir);

        assert_eq!(app.segments()[0], Segment::link("Hidden", ""));
        app.focus_next_link();
        assert_eq!(app.focused_link(), Some(2));
        app.focus_next_link();
        assert_eq!(app.focused_link(), Some(2));
        app.focus_previous_link();
        assert_eq!(app.focused_link(), Some(2));
    }

    #[test]
    fn following_a_link_opens_the_page_and_back_returns() {
        let dir = wiki_dir();
        let mut app = app(&dir);

        app.focus_next_link();
        app.follow_focused_link();
        assert_eq!(app.current_title(), Some("Other"));
        assert_eq!(app.page_list_state.selected(), Some(1));
        assert_eq!(app.focused_link(), None);

        app.back();
        assert_eq!(app.current_title(), Some("Home"));
        // Nothing left to go back to
        app.back();
        assert_eq!(app.current_title(), Some("Home"));
    }

    #[test]
    fn following_a_missing_link_reports_not_found() {
        let dir = wiki_dir();
        let mut app = app(&dir);

        app.focus_previous_link();
        app.follow_focused_link();

        assert_eq!(app.current_title(), Some("Home"));
        assert_eq!(app.status(), Some("Page not found: Missing"));

        // Moving on clears the notice
        app.next_page();
        assert_eq!(app.status(), None);
    }

    #[test]
    fn follow_without_focus_does_nothing() {
        let dir = wiki_dir();
        let mut app = app(&dir);

        app.follow_focused_link();
        assert_eq!(app.current_title(), Some("Home"));
        assert_eq!(app.status(), None);
    }

    #[test]
    fn reload_keeps_current_page_and_picks_up_new_ones() {
        let dir = wiki_dir();
        let mut app = app(&dir);
        app.next_page();

        fs::write(dir.path().join("Another.md"), "New").unwrap();
        app.reload().unwrap();

        assert_eq!(app.pages().len(), 3);
        assert_eq!(app.current_title(), Some("Other"));
        assert_eq!(app.page_list_state.selected(), Some(2));
    }

    #[test]
    fn unterminated_link_policy_is_applied() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Draft.md"), "todo [[Later").unwrap();

        let options = ParseOptions::default().with_unterminated_link(UnterminatedLink::Text);
        let app = App::new(dir.path().to_path_buf(), options).unwrap();

        assert_eq!(app.segments(), &[Segment::text("todo [[Later")]);
    }
}
