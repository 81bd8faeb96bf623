//! Row/pixel fan-out used by the generator and the two correction
//! passes. `rayon` is only a dependency on non-wasm targets (matching
//! the rest of this workspace), so the fan-out itself is cfg-gated here
//! rather than in every call site.

#[cfg(not(target_arch = "wasm32"))]
pub fn for_each_chunk_mut<T, F>(data: &mut [T], chunk_size: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync,
{
    use rayon::prelude::*;
    data.par_chunks_mut(chunk_size).enumerate().for_each(|(i, c)| f(i, c));
}

#[cfg(target_arch = "wasm32")]
pub fn for_each_chunk_mut<T, F>(data: &mut [T], chunk_size: usize, mut f: F)
where
    F: FnMut(usize, &mut [T]),
{
    data.chunks_mut(chunk_size).enumerate().for_each(|(i, c)| f(i, c));
}

#[cfg(not(target_arch = "wasm32"))]
pub fn for_each_mut<T, F>(data: &mut [T], f: F)
where
    T: Send,
    F: Fn(usize, &mut T) + Sync,
{
    use rayon::prelude::*;
    data.par_iter_mut().enumerate().for_each(|(i, v)| f(i, v));
}

#[cfg(target_arch = "wasm32")]
pub fn for_each_mut<T, F>(data: &mut [T], mut f: F)
where
    F: FnMut(usize, &mut T),
{
    data.iter_mut().enumerate().for_each(|(i, v)| f(i, v));
}
