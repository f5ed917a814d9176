//! Fork-join loops over elements and faces.
//!
//! With the `parallel` feature the loops run on the rayon pool; each task
//! owns exactly one output slot, so no synchronisation is needed.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Run `f(i, &mut items[i])` for every item.
#[cfg(feature = "parallel")]
pub(crate) fn for_each_mut<T, F>(items: &mut [T], f: F)
where
    T: Send,
    F: Fn(usize, &mut T) + Sync + Send,
{
    items.par_iter_mut().enumerate().for_each(|(i, item)| f(i, item));
}

#[cfg(not(feature = "parallel"))]
pub(crate) fn for_each_mut<T, F>(items: &mut [T], f: F)
where
    F: Fn(usize, &mut T),
{
    items.iter_mut().enumerate().for_each(|(i, item)| f(i, item));
}

/// Map every item, keeping the input order.
#[cfg(feature = "parallel")]
pub(crate) fn map_collect<T, R, F>(items: &[T], f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(usize, &T) -> R + Sync + Send,
{
    items.par_iter().enumerate().map(|(i, item)| f(i, item)).collect()
}

#[cfg(not(feature = "parallel"))]
pub(crate) fn map_collect<T, R, F>(items: &[T], f: F) -> Vec<R>
where
    F: Fn(usize, &T) -> R,
{
    items.iter().enumerate().map(|(i, item)| f(i, item)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_each_mut_visits_every_slot_once() {
        let mut v = vec![0usize; 1000];
        for_each_mut(&mut v, |i, x| *x += i);
        assert!(v.iter().enumerate().all(|(i, &x)| x == i));
    }

    #[test]
    fn test_map_collect_keeps_order() {
        let v: Vec<usize> = (0..500).collect();
        let doubled = map_collect(&v, |i, x| (i, 2 * x));
        assert!(doubled.iter().enumerate().all(|(i, &(j, y))| i == j && y == 2 * i));
    }
}
