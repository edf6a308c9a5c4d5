use rayon::prelude::*;

use pixfilt_image::Image;

/// Apply a function to each sample in the image in parallel.
///
/// The rows of `src` and `dst` are processed in parallel, each sample of a row sequentially.
///
/// PRECONDITION: `src` and `dst` must have the same shape.
pub fn par_iter_rows_val(src: &Image, dst: &mut Image, f: impl Fn(&f32, &mut f32) + Send + Sync) {
    let row_stride = src.num_channels() * src.cols();
    src.as_slice()
        .par_chunks_exact(row_stride)
        .zip(dst.as_slice_mut().par_chunks_exact_mut(row_stride))
        .for_each(|(src_chunk, dst_chunk)| {
            src_chunk
                .iter()
                .zip(dst_chunk.iter_mut())
                .for_each(|(src_sample, dst_sample)| {
                    f(src_sample, dst_sample);
                });
        });
}

/// Apply a function to each pair of samples of two images in parallel.
///
/// PRECONDITION: `src1`, `src2` and `dst` must have the same shape.
pub fn par_iter_rows_val_two(
    src1: &Image,
    src2: &Image,
    dst: &mut Image,
    f: impl Fn(&f32, &f32, &mut f32) + Send + Sync,
) {
    let row_stride = src1.num_channels() * src1.cols();
    src1.as_slice()
        .par_chunks_exact(row_stride)
        .zip(src2.as_slice().par_chunks_exact(row_stride))
        .zip(dst.as_slice_mut().par_chunks_exact_mut(row_stride))
        .for_each(|((src1_chunk, src2_chunk), dst_chunk)| {
            src1_chunk
                .iter()
                .zip(src2_chunk.iter())
                .zip(dst_chunk.iter_mut())
                .for_each(|((src1_sample, src2_sample), dst_sample)| {
                    f(src1_sample, src2_sample, dst_sample);
                });
        });
}

/// Fill each row of the image in parallel.
///
/// `f` receives the row index and the mutable samples of that row, laid out as
/// `cols * channels` interleaved values. Every row is visited exactly once.
pub fn par_iter_rows_indexed(dst: &mut Image, f: impl Fn(usize, &mut [f32]) + Send + Sync) {
    let row_stride = dst.num_channels() * dst.cols();
    dst.as_slice_mut()
        .par_chunks_exact_mut(row_stride)
        .enumerate()
        .for_each(|(row, dst_row)| f(row, dst_row));
}
