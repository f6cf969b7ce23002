//! Paginazione generica - una pagina di un insieme ordinato più i metadati
//!
//! `PagedList<T>` non conosce l'entità né lo storage: lavora su qualsiasi
//! `PageSource`, cioè qualcosa che sa contare l'intero insieme candidato e
//! restituirne una fetta (skip/take). Il conteggio viene fatto una sola volta
//! sull'insieme completo, la fetta sullo stesso insieme non materializzato.

use serde::Serialize;

/// Default page size when the client does not send one
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// Upper bound for page size, larger requests are clamped
pub const MAX_PAGE_SIZE: u32 = 50;

/// Ordered, countable candidate set that can be sliced
pub trait PageSource {
    type Item;

    /// Number of items in the whole candidate set
    async fn count(&self) -> Result<u64, sqlx::Error>;

    /// Items with rank in `[offset, offset + limit)`, in source order
    async fn fetch(&self, offset: u64, limit: u64) -> Result<Vec<Self::Item>, sqlx::Error>;
}

/// Una pagina di risultati con i metadati di paginazione
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PagedList<T> {
    pub items: Vec<T>,
    pub current_page: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u32,
}

impl<T> PagedList<T> {
    pub fn new(items: Vec<T>, total_count: u64, page_number: u32, page_size: u32) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_count.div_ceil(u64::from(page_size));
        Self {
            items,
            current_page: page_number.max(1),
            page_size,
            total_count,
            total_pages: u32::try_from(total_pages).unwrap_or(u32::MAX),
        }
    }

    /// Counts the whole source once, then fetches only the requested page.
    ///
    /// `page_number` is 1-based. Pages past the end come back empty with the
    /// real `total_count`.
    pub async fn create<S>(source: &S, page_number: u32, page_size: u32) -> Result<Self, sqlx::Error>
    where
        S: PageSource<Item = T> + ?Sized,
    {
        let page_number = page_number.max(1);
        let page_size = page_size.max(1);

        let total_count = source.count().await?;
        let offset = u64::from(page_number - 1) * u64::from(page_size);

        let items = if offset < total_count {
            source.fetch(offset, u64::from(page_size)).await?
        } else {
            Vec::new()
        };

        Ok(Self::new(items, total_count, page_number, page_size))
    }

    /// Trasforma gli elementi mantenendo i metadati (entity -> DTO)
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedList<U> {
        PagedList {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            page_size: self.page_size,
            total_count: self.total_count,
            total_pages: self.total_pages,
        }
    }
}

/// Normalizza i parametri di paginazione ricevuti dal client
pub fn clamp_page(page_number: u32, page_size: u32) -> (u32, u32) {
    (page_number.max(1), page_size.clamp(1, MAX_PAGE_SIZE))
}
