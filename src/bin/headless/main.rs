//! 无窗口驱动：按脚本推进场景并打印关键状态
//!
//! cargo run --bin headless --features headless

use folio_engine::scene::layout;
use folio_engine::{FrameInput, GrabTarget, PointerId, PortfolioScene, SceneConfig};
use glam::Vec2;

const FPS: f32 = 60.0;
const WIDTH: f32 = 1600.0;
const HEIGHT: f32 = 900.0;

fn main() -> folio_engine::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut scene = PortfolioScene::new(SceneConfig::default());
    scene.resize(WIDTH, HEIGHT)?;
    let urls: Vec<&str> = layout::all_assets().map(|(url, _)| url).collect();
    for url in urls {
        scene.assets_mut().mark_loaded(url)?;
    }
    scene.mount();

    let delta = 1.0 / FPS;
    let mut elapsed = 0.0;
    let mut frame = |scene: &mut PortfolioScene, pointer: Vec2| {
        elapsed += delta;
        scene.update(&FrameInput::new(elapsed, delta, pointer));
    };

    // 1. 挂绳自由下落并静止
    for _ in 0..120 {
        frame(&mut scene, Vec2::ZERO);
    }
    if let Some(card) = scene.output().card {
        log::info!("[Headless] 卡片静止位置: {:?}", card.translation);
    }

    // 2. 抓住卡片向右拖动后甩出
    let card_ndc = scene
        .output()
        .card
        .map(|c| scene.camera().project(c.translation).truncate())
        .unwrap_or(Vec2::ZERO);
    let pointer = PointerId(1);
    match scene.pointer_down(pointer, card_ndc) {
        Some(GrabTarget::Card) => {
            for i in 0..30 {
                let drag = card_ndc + Vec2::new(i as f32 * 0.01, 0.0);
                frame(&mut scene, drag);
            }
            scene.pointer_up(pointer);
            log::info!("[Headless] 卡片已甩出, 模式 {:?}", scene.lanyard().mode());
        }
        other => log::warn!("[Headless] 未能抓住卡片: {:?}", other),
    }
    for _ in 0..60 {
        frame(&mut scene, Vec2::ZERO);
    }

    // 3. 跳到页面底部
    scene.on_scroll(HEIGHT * 2.0, HEIGHT * 3.0, HEIGHT);
    for i in 0..90 {
        frame(&mut scene, Vec2::new(0.3, 0.2));
        if i % 30 == 0 {
            let pose = scene.output().camera;
            log::info!("[Headless] 相机 y={:.3} z={:.3}", pose.y, pose.z);
        }
    }

    let out = scene.output();
    log::info!(
        "[Headless] 结束: 丝带 {} 点, 光标 {}, 视差 {:?}",
        out.ribbon.len(),
        out.cursor.as_css(),
        out.parallax
    );
    scene.unmount();
    Ok(())
}
