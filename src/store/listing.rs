use crate::errors::Result;
use crate::store::bucket::Bucket;

/// Lazy, one-shot sequence of object URLs.
///
/// Pages are requested from the store only when the previous page has been
/// consumed. Order is whatever the store returns. After an error the
/// iterator yields nothing further.
pub struct ObjectUrls<'a> {
    bucket: &'a Bucket,
    pattern: Option<String>,
    page: std::vec::IntoIter<String>,
    next_token: Option<String>,
    done: bool,
}

impl<'a> ObjectUrls<'a> {
    pub(crate) fn new(bucket: &'a Bucket, pattern: Option<String>) -> Self {
        Self {
            bucket,
            pattern,
            page: Vec::new().into_iter(),
            next_token: None,
            done: false,
        }
    }

    fn wanted(&self, name: &str) -> bool {
        self.pattern
            .as_deref()
            .is_none_or(|pattern| name.contains(pattern))
    }
}

impl Iterator for ObjectUrls<'_> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(name) = self.page.next() {
                if self.wanted(&name) {
                    return Some(Ok(self.bucket.url_for(&name)));
                }
                continue;
            }

            if self.done {
                return None;
            }

            match self.bucket.store.list_page(self.next_token.take()) {
                Ok(page) => {
                    self.done = page.next_token.is_none();
                    self.next_token = page.next_token;
                    self.page = page.names.into_iter();
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
