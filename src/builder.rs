//! Deferred, context-parametric node construction.
//!
//! A [`Builder`] wraps one function from a context to a freshly built node.
//! Combinators never touch their receiver: each returns a new builder that
//! closes over the previous build function, so a builder can be shared,
//! extended in several directions and built any number of times.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::{instrument, trace};

use crate::fallible::TryBuilder;
use crate::node::Node;

/// Immutable description of how to build a node of type `N` from a context
/// of type `C`, carrying annotations of type `A`.
///
/// Cloning is cheap: clones share the same build function.
pub struct Builder<C: ?Sized, N, A> {
    build: Arc<dyn Fn(&C) -> N + Send + Sync>,
    annotation: PhantomData<fn() -> A>,
}

impl<C: ?Sized, N, A> Clone for Builder<C, N, A> {
    fn clone(&self) -> Self {
        Self {
            build: Arc::clone(&self.build),
            annotation: PhantomData,
        }
    }
}

impl<C: ?Sized, N, A> fmt::Debug for Builder<C, N, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder").finish_non_exhaustive()
    }
}

impl<C, N, A> Builder<C, N, A>
where
    C: ?Sized + 'static,
    N: Node<A> + 'static,
    A: 'static,
{
    /// Wrap `build` verbatim. No validation happens here; whatever `build`
    /// does (including panicking) surfaces in the caller of [`Builder::build`].
    pub fn new<F>(build: F) -> Self
    where
        F: Fn(&C) -> N + Send + Sync + 'static,
    {
        Self {
            build: Arc::new(build),
            annotation: PhantomData,
        }
    }

    /// Builder that returns a clone of `node` on every build.
    pub fn leaf(node: N) -> Self
    where
        N: Clone + Send + Sync,
    {
        Self::new(move |_| node.clone())
    }

    /// Construct one node for `context`.
    ///
    /// Every call is an independent invocation; nothing is cached between
    /// builds.
    #[instrument(level = "trace", skip_all)]
    pub fn build(&self, context: &C) -> N {
        (self.build)(context)
    }

    /// Run `f` on the freshly built node before returning it.
    ///
    /// This is the extension point behind [`append`](Self::append),
    /// [`annotate`](Self::annotate) and [`lift`](Self::lift). `f` receives
    /// the same context the builder was built with. Chained taps run in
    /// composition order and all mutate the single node produced by the
    /// base builder.
    pub fn tap<F>(&self, f: F) -> Self
    where
        F: Fn(&C, &mut N) + Send + Sync + 'static,
    {
        let base = Arc::clone(&self.build);
        Self::new(move |context| {
            let mut node = base(context);
            f(context, &mut node);
            node
        })
    }

    /// Append one subtree per child builder, in the given order. Each child
    /// is built with the parent's context.
    pub fn append<I>(&self, children: I) -> Self
    where
        I: IntoIterator<Item = Builder<C, N, A>>,
    {
        let children: Vec<_> = children.into_iter().collect();
        trace!(children = children.len(), "composing append");
        self.tap(move |context, parent| {
            for child in &children {
                parent.append(child.build(context));
            }
        })
    }

    /// Shorthand for appending a single child.
    pub fn child(&self, child: Builder<C, N, A>) -> Self {
        self.append([child])
    }

    /// Attach `annotations` to the node, in the given order.
    ///
    /// Each build receives its own clones, so the builder stays reusable.
    /// `A` must be `Send + Sync` because the annotations live inside the
    /// shared build function, which keeps the builder itself `Send + Sync`.
    /// Wrap `!Sync` values (such as `Rc<T>`) in a thread-safe type, or attach
    /// them from a [`tap`](Self::tap) callback that creates them per build.
    pub fn annotate<I>(&self, annotations: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Clone + Send + Sync,
    {
        let annotations: Vec<A> = annotations.into_iter().collect();
        trace!(annotations = annotations.len(), "composing annotate");
        self.tap(move |_, node| {
            for annotation in &annotations {
                node.annotate(annotation.clone());
            }
        })
    }

    /// Append a subtree chosen at build time.
    ///
    /// `f` runs exactly once per build with the build context; the builder it
    /// returns is built with that same context and appended to the parent.
    pub fn lift<F>(&self, f: F) -> Self
    where
        F: Fn(&C) -> Builder<C, N, A> + Send + Sync + 'static,
    {
        self.tap(move |context, parent| {
            let subtree = f(context);
            parent.append(subtree.build(context));
        })
    }

    /// Append any number of subtrees chosen at build time, in iteration order.
    ///
    /// An empty iterator leaves the parent without new children, which makes
    /// this the natural way to express optional or repeated subtrees.
    ///
    /// The returned iterator cannot borrow from the context: `I` is a single
    /// type for every context lifetime. Collect borrowed data first, e.g.
    /// `ctx.split(',').map(..).collect::<Vec<_>>()`.
    pub fn lift_all<F, I>(&self, f: F) -> Self
    where
        F: Fn(&C) -> I + Send + Sync + 'static,
        I: IntoIterator<Item = Builder<C, N, A>>,
    {
        self.tap(move |context, parent| {
            for subtree in f(context) {
                parent.append(subtree.build(context));
            }
        })
    }

    /// View this builder as a [`TryBuilder`] that never fails.
    pub fn fallible<E: 'static>(&self) -> TryBuilder<C, N, A, E> {
        TryBuilder::from(self.clone())
    }
}
