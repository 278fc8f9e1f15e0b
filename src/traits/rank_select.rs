/// A binary sequence supporting rank queries.
pub trait Rank {
    /// Returns how many bits equal to `bit` appear in positions `[0, pos]`.
    fn rank(&self, bit: bool, pos: usize) -> usize;

    #[inline(always)]
    fn rank1(&self, pos: usize) -> usize {
        self.rank(true, pos)
    }

    #[inline(always)]
    fn rank0(&self, pos: usize) -> usize {
        self.rank(false, pos)
    }
}

/// A binary sequence supporting select queries.
pub trait Select {
    /// Returns the position of the `k`-th (1-based) bit equal to `bit`, or `None` if the sequence
    /// holds fewer than `k` such bits or `k` is 0.
    fn select(&self, bit: bool, k: usize) -> Option<usize>;

    #[inline(always)]
    fn select1(&self, k: usize) -> Option<usize> {
        self.select(true, k)
    }

    #[inline(always)]
    fn select0(&self, k: usize) -> Option<usize> {
        self.select(false, k)
    }
}
