//! Context adaptation at subtree boundaries.
//!
//! A subtree written against its own context type can be embedded in a tree
//! with a different context by projecting the outer context. Node and
//! annotation types stay the same on both sides.

use std::borrow::Borrow;

use crate::builder::Builder;
use crate::node::Node;

/// Build `inner` with the context produced by `project`.
///
/// The result accepts the outer context `C1`; on every build it computes
/// `project(outer)` and delegates to `inner`. Nothing else happens at the
/// boundary. The projection may return any owned form of `C2`, such as a
/// `String` for a `str` context.
pub fn scope<C1, C2, P, N, A, F>(inner: &Builder<C2, N, A>, project: F) -> Builder<C1, N, A>
where
    C1: ?Sized + 'static,
    C2: ?Sized + 'static,
    P: Borrow<C2>,
    N: Node<A> + 'static,
    A: 'static,
    F: Fn(&C1) -> P + Send + Sync + 'static,
{
    let inner = inner.clone();
    Builder::new(move |outer: &C1| inner.build(project(outer).borrow()))
}

/// Like [`scope`], but the projection borrows from the outer context.
///
/// Handy when the subtree only needs one field of a larger context and
/// cloning it would be wasteful.
pub fn scope_ref<C1, C2, N, A, F>(inner: &Builder<C2, N, A>, project: F) -> Builder<C1, N, A>
where
    C1: ?Sized + 'static,
    C2: ?Sized + 'static,
    N: Node<A> + 'static,
    A: 'static,
    F: for<'a> Fn(&'a C1) -> &'a C2 + Send + Sync + 'static,
{
    let inner = inner.clone();
    Builder::new(move |outer: &C1| inner.build(project(outer)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Leaf(String);

    impl Node<()> for Leaf {
        fn append(&mut self, child: Self) {
            self.0.push_str(&child.0);
        }

        fn annotate(&mut self, _: ()) {}
    }

    struct Page {
        title: String,
        width: usize,
    }

    #[test]
    fn given_owned_projection_when_building_then_inner_sees_projected_context() {
        let width = Builder::<usize, Leaf, ()>::new(|w| Leaf(format!("w={}", w)));

        let subject = scope(&width, |page: &Page| page.width * 2);
        let page = Page {
            title: "t".to_string(),
            width: 40,
        };

        assert_eq!(subject.build(&page), Leaf("w=80".to_string()));
    }

    #[test]
    fn given_owned_string_projection_when_inner_takes_str_then_borrows_it() {
        let title = Builder::<str, Leaf, ()>::new(|t| Leaf(t.to_string()));

        let subject = scope(&title, |page: &Page| format!("{} ({})", page.title, page.width));
        let page = Page {
            title: "intro".to_string(),
            width: 3,
        };

        assert_eq!(subject.build(&page), Leaf("intro (3)".to_string()));
    }

    #[test]
    fn given_borrowed_projection_when_building_then_inner_sees_field() {
        let title = Builder::<str, Leaf, ()>::new(|t| Leaf(t.to_uppercase()));

        let subject = scope_ref(&title, |page: &Page| page.title.as_str());
        let page = Page {
            title: "intro".to_string(),
            width: 0,
        };

        assert_eq!(subject.build(&page), Leaf("INTRO".to_string()));
    }
}
