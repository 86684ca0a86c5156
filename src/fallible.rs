//! Builders whose build functions can fail.
//!
//! Mirrors the [`Builder`] surface with `Result`-returning callbacks. The
//! first error ends the build and is handed back unchanged. Subtrees already
//! appended before the failure are not rolled back; they simply go down with
//! the discarded parent.

use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::{debug, instrument, trace};

use crate::builder::Builder;
use crate::node::Node;

/// Fallible counterpart of [`Builder`], failing with the caller's error `E`.
pub struct TryBuilder<C: ?Sized, N, A, E> {
    build: Arc<dyn Fn(&C) -> Result<N, E> + Send + Sync>,
    annotation: PhantomData<fn() -> A>,
}

impl<C: ?Sized, N, A, E> Clone for TryBuilder<C, N, A, E> {
    fn clone(&self) -> Self {
        Self {
            build: Arc::clone(&self.build),
            annotation: PhantomData,
        }
    }
}

impl<C: ?Sized, N, A, E> fmt::Debug for TryBuilder<C, N, A, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryBuilder").finish_non_exhaustive()
    }
}

impl<C, N, A, E> TryBuilder<C, N, A, E>
where
    C: ?Sized + 'static,
    N: Node<A> + 'static,
    A: 'static,
    E: 'static,
{
    pub fn new<F>(build: F) -> Self
    where
        F: Fn(&C) -> Result<N, E> + Send + Sync + 'static,
    {
        Self {
            build: Arc::new(build),
            annotation: PhantomData,
        }
    }

    /// Construct one node for `context`, or return the first error raised
    /// anywhere in the composition.
    ///
    /// The failure is logged once here; nested builders are run through
    /// [`run`](Self::run) so an error is not reported again at every level.
    #[instrument(level = "trace", skip_all)]
    pub fn try_build(&self, context: &C) -> Result<N, E> {
        self.run(context).inspect_err(|_| debug!("build failed"))
    }

    fn run(&self, context: &C) -> Result<N, E> {
        (self.build)(context)
    }

    /// Run `f` on the built node; an error from `f` fails the build.
    pub fn tap<F>(&self, f: F) -> Self
    where
        F: Fn(&C, &mut N) -> Result<(), E> + Send + Sync + 'static,
    {
        let base = Arc::clone(&self.build);
        Self::new(move |context| {
            let mut node = base(context)?;
            f(context, &mut node)?;
            Ok(node)
        })
    }

    /// Append children in order, stopping at the first child that fails.
    pub fn append<I>(&self, children: I) -> Self
    where
        I: IntoIterator<Item = TryBuilder<C, N, A, E>>,
    {
        let children: Vec<_> = children.into_iter().collect();
        trace!(children = children.len(), "composing fallible append");
        self.tap(move |context, parent| {
            for child in &children {
                parent.append(child.run(context)?);
            }
            Ok(())
        })
    }

    pub fn child(&self, child: TryBuilder<C, N, A, E>) -> Self {
        self.append([child])
    }

    /// Attach `annotations` in order, cloning them into every build.
    ///
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
        trace!(annotations = annotations.len(), "composing fallible annotate");
        self.tap(move |_, node| {
            for annotation in &annotations {
                node.annotate(annotation.clone());
            }
            Ok(())
        })
    }

    /// Append a subtree chosen at build time. `f` runs once per build and may
    /// itself fail.
    pub fn lift<F>(&self, f: F) -> Self
    where
        F: Fn(&C) -> Result<TryBuilder<C, N, A, E>, E> + Send + Sync + 'static,
    {
        self.tap(move |context, parent| {
            let subtree = f(context)?;
            parent.append(subtree.run(context)?);
            Ok(())
        })
    }

    /// Fallible [`Builder::lift_all`]. The iterator may not borrow from the
    /// context, so collect borrowed data into an owned collection first.
    pub fn lift_all<F, I>(&self, f: F) -> Self
    where
        F: Fn(&C) -> Result<I, E> + Send + Sync + 'static,
        I: IntoIterator<Item = TryBuilder<C, N, A, E>>,
    {
        self.tap(move |context, parent| {
            for subtree in f(context)? {
                parent.append(subtree.run(context)?);
            }
            Ok(())
        })
    }
}

impl<C, N, A, E> From<Builder<C, N, A>> for TryBuilder<C, N, A, E>
where
    C: ?Sized + 'static,
    N: Node<A> + 'static,
    A: 'static,
    E: 'static,
{
    fn from(builder: Builder<C, N, A>) -> Self {
        Self::new(move |context| Ok(builder.build(context)))
    }
}

/// Fallible [`scope`](crate::scope): the projection may reject the outer
/// context, in which case `inner` is never built.
pub fn try_scope<C1, C2, P, N, A, E, F>(
    inner: &TryBuilder<C2, N, A, E>,
    project: F,
) -> TryBuilder<C1, N, A, E>
where
    C1: ?Sized + 'static,
    C2: ?Sized + 'static,
    P: Borrow<C2>,
    N: Node<A> + 'static,
    A: 'static,
    E: 'static,
    F: Fn(&C1) -> Result<P, E> + Send + Sync + 'static,
{
    let inner = inner.clone();
    TryBuilder::new(move |outer: &C1| inner.run(project(outer)?.borrow()))
}
