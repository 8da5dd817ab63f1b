use async_stream::stream;
use futures::{Future, Stream};
use url::Url;

/// One page of a listing plus the address of the page after it.
#[derive(Clone, Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<Url>,
}

/// Walks a paginated listing starting at `first`, yielding every item of every
/// page in order. The stream ends after the last page or after the first error.
pub fn paginate<T, E, F, Fut>(first: Url, mut fetch: F) -> impl Stream<Item = Result<T, E>>
where
    F: FnMut(Url) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
{
    stream! {
        let mut next = Some(first);
        while let Some(url) = next.take() {
            match fetch(url).await {
                Ok(page) => {
                    next = page.next;
                    for item in page.items {
                        yield Ok(item);
                    }
                }
                Err(err) => {
                    yield Err(err);
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Project;
    use futures::TryStreamExt;
    use std::{cell::RefCell, collections::HashMap};

    fn url(page: u32) -> Url {
        Url::parse(&format!("https://gitlab.example.com/api/v4/projects?page={}", page)).unwrap()
    }

    fn project_pages(count: u32) -> HashMap<String, Page<Project>> {
        (1..=count)
            .map(|n| {
                let next = if n < count { Some(url(n + 1)) } else { None };
                let page = Page {
                    items: vec![Project::new(n.into(), format!("p{}", n))],
                    next,
                };
                (url(n).to_string(), page)
            })
            .collect()
    }

    #[tokio::test]
    async fn three_pages_flatten_in_order() {
        let pages = project_pages(3);
        let requested = RefCell::new(Vec::new());

        let projects: Vec<Project> = paginate(url(1), |url: Url| {
            requested.borrow_mut().push(url.to_string());
            let page = pages.get(url.as_str()).cloned();
            async move { page.ok_or("missing page") }
        })
        .try_collect()
        .await
        .unwrap();

        let names: Vec<_> = projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["p1", "p2", "p3"]);
        assert_eq!(requested.borrow().len(), 3);
    }

    #[tokio::test]
    async fn single_empty_page_yields_nothing() {
        let projects: Vec<Project> = paginate(url(1), |_| async {
            Ok::<_, &str>(Page {
                items: Vec::new(),
                next: None,
            })
        })
        .try_collect()
        .await
        .unwrap();

        assert!(projects.is_empty());
    }

    #[tokio::test]
    async fn error_stops_the_walk() {
        let mut pages = project_pages(3);
        pages.remove(&url(2).to_string());
        let calls = RefCell::new(0);

        let result: Result<Vec<Project>, &str> = paginate(url(1), |url: Url| {
            *calls.borrow_mut() += 1;
            let page = pages.get(url.as_str()).cloned();
            async move { page.ok_or("missing page") }
        })
        .try_collect()
        .await;

        assert_eq!(result.unwrap_err(), "missing page");
        assert_eq!(*calls.borrow(), 2);
    }
}
