use crate::links::TitleIndex;

use super::{Page, PageId, PageUpdate, Wiki, WikiId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Wiki name is required")]
    NameRequired,
    #[error("Wiki name is required for update")]
    NameRequiredForUpdate,
    #[error("Wiki with this name already exists: {0}")]
    DuplicateWikiName(String),
    #[error("Another wiki with this name already exists: {0}")]
    AnotherWikiNamed(String),
    #[error("Wiki not found: {0}")]
    WikiNotFound(WikiId),
    #[error("Title and content are required")]
    TitleAndContentRequired,
    #[error("Page with this title already exists: {0}")]
    DuplicatePageTitle(String),
    #[error("Another page with this title already exists: {0}")]
    AnotherPageTitled(String),
    #[error("Page not found: {0}")]
    PageNotFound(PageId),
    #[error("Nothing to update")]
    NothingToUpdate,
}

#[derive(Debug)]
struct WikiEntry {
    wiki: Wiki,
    /// Creation order, oldest first.
    pages: Vec<Page>,
}

impl WikiEntry {
    fn page_index(&self, id: PageId) -> Result<usize, StoreError> {
        self.pages
            .iter()
            .position(|p| p.id == id)
            .ok_or(StoreError::PageNotFound(id))
    }

    fn title_taken(&self, title: &str, except: Option<PageId>) -> bool {
        self.pages
            .iter()
            .any(|p| p.title == title && Some(p.id) != except)
    }
}

/// In-memory catalog of one user's wikis and their pages.
///
/// Enforces the catalog rules: wiki names and page titles are required and
/// unique within their scope, and deleting a wiki deletes its pages.
/// Listings come back newest first.
#[derive(Debug, Default)]
pub struct WikiStore {
    /// Creation order, oldest first.
    wikis: Vec<WikiEntry>,
}

impl WikiStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_wiki(&mut self, name: &str) -> Result<WikiId, StoreError> {
        if name.is_empty() {
            return Err(StoreError::NameRequired);
        }
        if self.wikis.iter().any(|e| e.wiki.name == name) {
            return Err(StoreError::DuplicateWikiName(name.to_string()));
        }

        let id = WikiId::new();
        log::debug!("created wiki {name:?} ({id})");
        self.wikis.push(WikiEntry {
            wiki: Wiki {
                id,
                name: name.to_string(),
            },
            pages: Vec::new(),
        });
        Ok(id)
    }

    pub fn rename_wiki(&mut self, id: WikiId, name: &str) -> Result<&Wiki, StoreError> {
        if name.is_empty() {
            return Err(StoreError::NameRequiredForUpdate);
        }
        self.entry(id)?;
        if self
            .wikis
            .iter()
            .any(|e| e.wiki.id != id && e.wiki.name == name)
        {
            return Err(StoreError::AnotherWikiNamed(name.to_string()));
        }

        let entry = self.entry_mut(id)?;
        entry.wiki.name = name.to_string();
        Ok(&entry.wiki)
    }

    /// Removes a wiki together with all of its pages.
    pub fn delete_wiki(&mut self, id: WikiId) -> Result<Wiki, StoreError> {
        let index = self
            .wikis
            .iter()
            .position(|e| e.wiki.id == id)
            .ok_or(StoreError::WikiNotFound(id))?;
        let entry = self.wikis.remove(index);
        log::debug!(
            "deleted wiki {:?} with {} pages",
            entry.wiki.name,
            entry.pages.len()
        );
        Ok(entry.wiki)
    }

    pub fn wiki(&self, id: WikiId) -> Option<&Wiki> {
        self.entry(id).ok().map(|e| &e.wiki)
    }

    /// All wikis, newest first.
    pub fn wikis(&self) -> impl Iterator<Item = &Wiki> {
        self.wikis.iter().rev().map(|e| &e.wiki)
    }

    pub fn create_page(
        &mut self,
        wiki: WikiId,
        title: &str,
        content: &str,
    ) -> Result<PageId, StoreError> {
        if title.is_empty() || content.is_empty() {
            return Err(StoreError::TitleAndContentRequired);
        }
        let entry = self.entry_mut(wiki)?;
        if entry.title_taken(title, None) {
            return Err(StoreError::DuplicatePageTitle(title.to_string()));
        }

        let page = Page::new(title, content);
        let id = page.id;
        log::debug!("created page {title:?} ({id}) in wiki {wiki}");
        entry.pages.push(page);
        Ok(id)
    }

    /// Applies the supplied fields of `update`; the rest stay as they were.
    pub fn update_page(
        &mut self,
        wiki: WikiId,
        page: PageId,
        update: PageUpdate,
    ) -> Result<&Page, StoreError> {
        let update = update.normalized();
        if update.is_empty() {
            return Err(StoreError::NothingToUpdate);
        }
        let entry = self.entry_mut(wiki)?;
        let index = entry.page_index(page)?;
        if let Some(title) = &update.title
            && entry.title_taken(title, Some(page))
        {
            return Err(StoreError::AnotherPageTitled(title.clone()));
        }

        let stored = &mut entry.pages[index];
        if let Some(title) = update.title {
            stored.title = title;
        }
        if let Some(content) = update.content {
            stored.content = content;
        }
        log::debug!("updated page {:?} ({page})", stored.title);
        Ok(stored)
    }

    pub fn delete_page(&mut self, wiki: WikiId, page: PageId) -> Result<Page, StoreError> {
        let entry = self.entry_mut(wiki)?;
        let index = entry.page_index(page)?;
        let removed = entry.pages.remove(index);
        log::debug!("deleted page {:?} ({page})", removed.title);
        Ok(removed)
    }

    pub fn page(&self, wiki: WikiId, page: PageId) -> Option<&Page> {
        let entry = self.entry(wiki).ok()?;
        entry.pages.iter().find(|p| p.id == page)
    }

    /// Pages of a wiki, newest first.
    pub fn pages(&self, wiki: WikiId) -> Result<impl Iterator<Item = &Page>, StoreError> {
        Ok(self.entry(wiki)?.pages.iter().rev())
    }

    /// Pages whose title contains `query`, sorted by title.
    ///
    /// An empty query matches every page.
    pub fn search_pages(&self, wiki: WikiId, query: &str) -> Result<Vec<&Page>, StoreError> {
        let mut found: Vec<&Page> = self
            .entry(wiki)?
            .pages
            .iter()
            .filter(|p| p.title.contains(query))
            .collect();
        found.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(found)
    }

    /// A fresh title index for resolving links between the wiki's pages.
    pub fn title_index(&self, wiki: WikiId) -> Result<TitleIndex<PageId>, StoreError> {
        Ok(TitleIndex::from_pages(&self.entry(wiki)?.pages))
    }

    fn entry(&self, id: WikiId) -> Result<&WikiEntry, StoreError> {
        self.wikis
            .iter()
            .find(|e| e.wiki.id == id)
            .ok_or(StoreError::WikiNotFound(id))
    }

    fn entry_mut(&mut self, id: WikiId) -> Result<&mut WikiEntry, StoreError> {
        self.wikis
            .iter_mut()
            .find(|e| e.wiki.id == id)
            .ok_or(StoreError::WikiNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::{Resolution, resolve};
    use pretty_assertions::assert_eq;

    fn store_with_wiki() -> (WikiStore, WikiId) {
        let mut store = WikiStore::new();
        let wiki = store.create_wiki("Notes").unwrap();
        (store, wiki)
    }

    fn titles<'a>(pages: impl IntoIterator<Item = &'a Page>) -> Vec<&'a str> {
        pages.into_iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn test_wiki_name_is_required() {
        let mut store = WikiStore::new();
        assert_eq!(store.create_wiki(""), Err(StoreError::NameRequired));
    }

    #[test]
    fn test_wiki_names_are_unique() {
        let (mut store, _) = store_with_wiki();
        assert_eq!(
            store.create_wiki("Notes"),
            Err(StoreError::DuplicateWikiName("Notes".to_string()))
        );
    }

    #[test]
    fn test_wikis_listed_newest_first() {
        let (mut store, _) = store_with_wiki();
        store.create_wiki("Recipes").unwrap();
        let names: Vec<_> = store.wikis().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["Recipes", "Notes"]);
    }

    #[test]
    fn test_rename_wiki() {
        let (mut store, wiki) = store_with_wiki();
        let other = store.create_wiki("Recipes").unwrap();

        assert_eq!(store.rename_wiki(wiki, "Journal").unwrap().name, "Journal");
        // Renaming to its own name is allowed
        assert!(store.rename_wiki(wiki, "Journal").is_ok());
        assert_eq!(
            store.rename_wiki(other, "Journal"),
            Err(StoreError::AnotherWikiNamed("Journal".to_string()))
        );
        assert_eq!(
            store.rename_wiki(wiki, ""),
            Err(StoreError::NameRequiredForUpdate)
        );

        let missing = WikiId::new();
        assert_eq!(
            store.rename_wiki(missing, "X"),
            Err(StoreError::WikiNotFound(missing))
        );
    }

    #[test]
    fn test_update_errors_read_differently_from_create_errors() {
        let (mut store, wiki) = store_with_wiki();
        let other = store.create_wiki("Recipes").unwrap();
        let home = store.create_page(wiki, "Home", "x").unwrap();
        store.create_page(wiki, "About", "y").unwrap();

        let messages = [
            store.rename_wiki(wiki, "").unwrap_err().to_string(),
            store.rename_wiki(other, "Notes").unwrap_err().to_string(),
            store
                .update_page(wiki, home, PageUpdate::title("About"))
                .unwrap_err()
                .to_string(),
            store.create_wiki("Notes").unwrap_err().to_string(),
        ];
        assert_eq!(
            messages,
            [
                "Wiki name is required for update",
                "Another wiki with this name already exists: Notes",
                "Another page with this title already exists: About",
                "Wiki with this name already exists: Notes",
            ]
        );
    }

    #[test]
    fn test_delete_wiki_removes_pages() {
        let (mut store, wiki) = store_with_wiki();
        let page = store.create_page(wiki, "Home", "Welcome").unwrap();

        let deleted = store.delete_wiki(wiki).unwrap();
        assert_eq!(deleted.name, "Notes");
        assert!(store.wiki(wiki).is_none());
        assert!(store.page(wiki, page).is_none());
        assert!(store.pages(wiki).is_err());
        assert_eq!(
            store.delete_wiki(wiki),
            Err(StoreError::WikiNotFound(wiki))
        );
    }

    #[test]
    fn test_create_page_requires_title_and_content() {
        let (mut store, wiki) = store_with_wiki();
        assert_eq!(
            store.create_page(wiki, "", "body"),
            Err(StoreError::TitleAndContentRequired)
        );
        assert_eq!(
            store.create_page(wiki, "Title", ""),
            Err(StoreError::TitleAndContentRequired)
        );
    }

    #[test]
    fn test_create_page_in_missing_wiki() {
        let mut store = WikiStore::new();
        let missing = WikiId::new();
        assert_eq!(
            store.create_page(missing, "Home", "x"),
            Err(StoreError::WikiNotFound(missing))
        );
    }

    #[test]
    fn test_page_titles_unique_per_wiki() {
        let (mut store, wiki) = store_with_wiki();
        let other = store.create_wiki("Other").unwrap();
        store.create_page(wiki, "Home", "a").unwrap();

        assert_eq!(
            store.create_page(wiki, "Home", "b"),
            Err(StoreError::DuplicatePageTitle("Home".to_string()))
        );
        // Same title in another wiki is fine
        assert!(store.create_page(other, "Home", "c").is_ok());
    }

    #[test]
    fn test_update_page_fields_independently() {
        let (mut store, wiki) = store_with_wiki();
        let page = store.create_page(wiki, "Home", "old").unwrap();

        let updated = store
            .update_page(wiki, page, PageUpdate::content("new"))
            .unwrap();
        assert_eq!(updated.title, "Home");
        assert_eq!(updated.content, "new");

        let updated = store
            .update_page(wiki, page, PageUpdate::title("Start"))
            .unwrap();
        assert_eq!(updated.title, "Start");
        assert_eq!(updated.content, "new");
    }

    #[test]
    fn test_update_page_with_nothing() {
        let (mut store, wiki) = store_with_wiki();
        let page = store.create_page(wiki, "Home", "x").unwrap();
        assert_eq!(
            store.update_page(wiki, page, PageUpdate::default()),
            Err(StoreError::NothingToUpdate)
        );
        assert_eq!(
            store.update_page(wiki, page, PageUpdate::title("").with_content("")),
            Err(StoreError::NothingToUpdate)
        );
    }

    #[test]
    fn test_update_page_title_conflicts() {
        let (mut store, wiki) = store_with_wiki();
        let home = store.create_page(wiki, "Home", "x").unwrap();
        store.create_page(wiki, "About", "y").unwrap();

        assert_eq!(
            store.update_page(wiki, home, PageUpdate::title("About")),
            Err(StoreError::AnotherPageTitled("About".to_string()))
        );
        // Keeping its own title is not a conflict
        assert!(
            store
                .update_page(wiki, home, PageUpdate::title("Home").with_content("z"))
                .is_ok()
        );
    }

    #[test]
    fn test_update_missing_page() {
        let (mut store, wiki) = store_with_wiki();
        let missing = PageId::new();
        assert_eq!(
            store.update_page(wiki, missing, PageUpdate::content("x")),
            Err(StoreError::PageNotFound(missing))
        );
    }

    #[test]
    fn test_delete_page() {
        let (mut store, wiki) = store_with_wiki();
        let page = store.create_page(wiki, "Home", "x").unwrap();

        assert_eq!(store.delete_page(wiki, page).unwrap().title, "Home");
        assert!(store.page(wiki, page).is_none());
        assert_eq!(
            store.delete_page(wiki, page),
            Err(StoreError::PageNotFound(page))
        );
    }

    #[test]
    fn test_pages_listed_newest_first() {
        let (mut store, wiki) = store_with_wiki();
        for title in ["First", "Second", "Third"] {
            store.create_page(wiki, title, "x").unwrap();
        }
        assert_eq!(
            titles(store.pages(wiki).unwrap()),
            vec!["Third", "Second", "First"]
        );
    }

    #[test]
    fn test_search_pages_filters_and_sorts_by_title() {
        let (mut store, wiki) = store_with_wiki();
        for title in ["Garden log", "Cooking", "Log book", "Catalog"] {
            store.create_page(wiki, title, "x").unwrap();
        }

        assert_eq!(
            titles(store.search_pages(wiki, "log").unwrap()),
            vec!["Catalog", "Garden log"]
        );
        assert_eq!(
            titles(store.search_pages(wiki, "").unwrap()),
            vec!["Catalog", "Cooking", "Garden log", "Log book"]
        );
    }

    #[test]
    fn test_title_index_follows_changes() {
        let (mut store, wiki) = store_with_wiki();
        let home = store.create_page(wiki, "Home", "x").unwrap();

        let index = store.title_index(wiki).unwrap();
        assert_eq!(resolve("Home", &index), Resolution::Found(&home));

        store
            .update_page(wiki, home, PageUpdate::title("Start"))
            .unwrap();
        let index = store.title_index(wiki).unwrap();
        assert_eq!(resolve("Home", &index), Resolution::NotFound);
        assert_eq!(resolve("Start", &index), Resolution::Found(&home));
    }
}
