//! Node capability: what a caller's tree-node type must provide.

/// Structural contract for nodes produced by a [`Builder`](crate::Builder).
///
/// Implementations must keep children and annotations in call order.
/// The toolkit never inspects node values; it only appends and annotates.
pub trait Node<A> {
    /// Attach `child` as the last child of this node.
    fn append(&mut self, child: Self)
    where
        Self: Sized;

    /// Attach `annotation` after any existing annotations.
    fn annotate(&mut self, annotation: A);
}

impl<N, A> Node<A> for Box<N>
where
    N: Node<A>,
{
    fn append(&mut self, child: Self) {
        self.as_mut().append(*child);
    }

    fn annotate(&mut self, annotation: A) {
        self.as_mut().annotate(annotation);
    }
}
