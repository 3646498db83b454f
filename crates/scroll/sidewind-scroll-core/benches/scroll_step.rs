use criterion::{black_box, criterion_group, criterion_main, Criterion};

use sidewind_scroll_core::{
    config::{CameraConfig, Config, LayerCfg},
    data::{Margins, PrototypeDesc, TileIngredient},
    engine::Engine,
    inputs::Inputs,
};

fn build_engine(slots: u32) -> Engine {
    let mut eng = Engine::new(Config {
        camera: CameraConfig {
            orthographic_size: 4.0,
            aspect: 2.0,
            position_x: 0.0,
        },
    })
    .expect("viewport");
    let p = eng
        .load_prototype(PrototypeDesc {
            name: "segment".into(),
            min_x: 0.0,
            max_x: 5.0,
            local_origin_x: 0.0,
            margins: Margins {
                left_inner: 0.25,
                right_inner: 0.25,
                ..Default::default()
            },
        })
        .expect("prototype");
    eng.create_layer(
        "bench",
        &[TileIngredient {
            prototype: p,
            repeat: slots,
        }],
        LayerCfg {
            looping: true,
            ..Default::default()
        },
    )
    .expect("layer");
    eng
}

fn bench_scroll_step(c: &mut Criterion) {
    // Low hundreds of slots is the documented operating range of the
    // brute-force passes.
    for &slots in &[50u32, 300] {
        let mut eng = build_engine(slots);
        c.bench_function(&format!("scroll_step/{slots}_slots"), |b| {
            b.iter(|| {
                let out = eng
                    .update(black_box(1.0 / 60.0), Inputs::with_speed(3.0))
                    .expect("tick");
                black_box(out.placements.len());
            })
        });
    }
}

criterion_group!(benches, bench_scroll_step);
criterion_main!(benches);
