use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;
use sh_relight::camera::Camera;
use sh_relight::export::ExportTarget;
use sh_relight::raster::{self, FrameBuffer, DEFAULT_BACKGROUND};
use sh_relight::scene::{Scene, SceneKind};
use sh_relight::session::Session;
use sh_relight::sh::{evaluate, evaluate_rgb, RgbCoefficients, ShEnvironment, DEFAULT_COEFFICIENTS};
use std::f32::consts::PI;
use std::rc::Rc;

/// Deterministic unit normal spread over the sphere
fn unit_normal(seed: u32) -> Vec3 {
    let theta = (seed as f32 * 0.123456) % (2.0 * PI);
    let phi = (seed as f32 * 0.789012) % PI;
    Vec3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos())
}

fn bench_evaluate(c: &mut Criterion) {
    let normals: Vec<Vec3> = (0..1024).map(unit_normal).collect();
    c.bench_function("evaluate_1024_normals", |b| {
        b.iter(|| {
            let mut sum = 0.0;
            for n in &normals {
                sum += evaluate(black_box(&DEFAULT_COEFFICIENTS), *n);
            }
            black_box(sum)
        })
    });
}

fn bench_evaluate_rgb(c: &mut Criterion) {
    let normals: Vec<Vec3> = (0..1024).map(unit_normal).collect();
    let mut coefficients = RgbCoefficients::achromatic(DEFAULT_COEFFICIENTS);
    coefficients.r[0] = 1.4;
    coefficients.b[2] = -0.2;
    c.bench_function("evaluate_rgb_1024_normals", |b| {
        b.iter(|| {
            let mut sum = [0.0f32; 3];
            for n in &normals {
                let e = evaluate_rgb(black_box(&coefficients), *n);
                sum[0] += e[0];
                sum[1] += e[1];
                sum[2] += e[2];
            }
            black_box(sum)
        })
    });
}

fn bench_cpu_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("cpu_frame");
    group.sample_size(20);
    for &(width, height) in &[(320u32, 240u32), (800, 600)] {
        let scene = Scene::from_provider(Rc::new(ShEnvironment::default()), &SceneKind::Showcase);
        let camera = Camera::new();
        let mut frame = FrameBuffer::new(width, height);
        let label = format!("{}x{}", width, height);
        group.bench_with_input(BenchmarkId::new("showcase", label), &(width, height), |b, _| {
            b.iter(|| black_box(raster::render(&scene, &camera, DEFAULT_BACKGROUND, &mut frame)))
        });
    }
    group.finish();
}

fn bench_edit_and_rerender(c: &mut Criterion) {
    let dir = std::env::temp_dir();
    let export = ExportTarget::new(dir, false);
    let mut session = Session::new(&SceneKind::Sphere, 320, 240, export);
    let mut step = 0u32;
    c.bench_function("slider_edit_then_rerender", |b| {
        b.iter(|| {
            step = step.wrapping_add(1);
            let value = (step % 100) as f32 * 0.02 - 1.0;
            session.controls().set_by_index(4, value).ok();
            black_box(session.render_if_stale())
        })
    });
}

criterion_group!(
    benches,
    bench_evaluate,
    bench_evaluate_rgb,
    bench_cpu_frame,
    bench_edit_and_rerender,
);

criterion_main!(benches);
