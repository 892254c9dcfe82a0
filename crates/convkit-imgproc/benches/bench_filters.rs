use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

use convkit_image::{CpuAllocator, Image};
use convkit_imgproc::filter::Filter3;

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("Filter3");
    let mut rng = StdRng::seed_from_u64(0);

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        // input image
        let mut image_data = vec![0u8; width * height * 3];
        rng.fill(&mut image_data[..]);
        let image_size = [*width, *height].into();
        let image = Image::<u8, 3>::new(image_size, image_data, CpuAllocator).unwrap();

        // output image
        let output = image.clone();

        for filter in [Filter3::Blur, Filter3::BlurFiltered, Filter3::Sharpen] {
            group.bench_with_input(
                BenchmarkId::new(filter.to_string().replace(' ', "_"), &parameter_string),
                &(&image, &output),
                |b, i| {
                    let (src, mut dst) = (i.0, i.1.clone());
                    b.iter(|| black_box(filter.apply(src, &mut dst)))
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_filters);
criterion_main!(benches);
