use std::time::Duration;

use dioxus::document::eval;
use rand::Rng;

/// Length of the confetti animation.
pub(super) const CELEBRATION_DURATION: Duration = Duration::from_millis(3000);
/// Gap between bursts.
pub(super) const BURST_INTERVAL: Duration = Duration::from_millis(250);

const MAX_PARTICLES: f64 = 50.0;

const CHIME_SCRIPT: &str = r#"(function() {
    try {
        const AudioCtx = window.AudioContext || window.webkitAudioContext;
        if (!AudioCtx) return;
        const ctx = new AudioCtx();
        const notes = [523.25, 659.25, 783.99, 1046.5];
        notes.forEach((freq, i) => {
            const osc = ctx.createOscillator();
            const gain = ctx.createGain();
            const start = ctx.currentTime + i * 0.11;
            osc.type = "triangle";
            osc.frequency.value = freq;
            gain.gain.setValueAtTime(0.0001, start);
            gain.gain.exponentialRampToValueAtTime(0.25, start + 0.02);
            gain.gain.exponentialRampToValueAtTime(0.0001, start + 0.45);
            osc.connect(gain);
            gain.connect(ctx.destination);
            osc.start(start);
            osc.stop(start + 0.5);
        });
        setTimeout(() => ctx.close(), 1500);
    } catch (_) {}
})();"#;

const BURST_SCRIPT_TEMPLATE: &str = r##"(function() {
    try {
        const bursts = [{bursts}];
        const colors = ["#f4b942", "#e4572e", "#29335c", "#17bebb", "#76b041", "#ffc914"];
        let layer = document.getElementById("confetti-layer");
        if (!layer) {
            layer = document.createElement("div");
            layer.id = "confetti-layer";
            document.body.appendChild(layer);
        }
        bursts.forEach(([x, y, count]) => {
            for (let i = 0; i < count; i++) {
                const piece = document.createElement("span");
                piece.className = "confetti-piece";
                piece.style.left = (x * 100) + "vw";
                piece.style.top = (y * 100) + "vh";
                piece.style.background = colors[Math.floor(Math.random() * colors.length)];
                layer.appendChild(piece);
                const angle = Math.random() * Math.PI * 2;
                const speed = 120 + Math.random() * 220;
                const dx = Math.cos(angle) * speed;
                const dy = Math.sin(angle) * speed + 260;
                const spin = Math.random() * 720 - 360;
                const anim = piece.animate([
                    { transform: "translate(0, 0) rotate(0deg)", opacity: 1 },
                    { transform: `translate(${dx}px, ${dy}px) rotate(${spin}deg)`, opacity: 0 }
                ], { duration: 900 + Math.random() * 700, easing: "cubic-bezier(.2,.7,.4,1)" });
                anim.onfinish = () => piece.remove();
            }
        });
    } catch (_) {}
})();"##;

/// One emission point for a single tick of the animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct ConfettiBurst {
    pub x: f64,
    pub y: f64,
    pub particles: u32,
}

/// Bursts for every tick: two per tick, left and right, thinning out as time runs down.
pub(super) fn plan_bursts<R: Rng + ?Sized>(rng: &mut R) -> Vec<[ConfettiBurst; 2]> {
    let total = CELEBRATION_DURATION.as_millis();
    let step = BURST_INTERVAL.as_millis();
    (0..total / step)
        .map(|tick| {
            let time_left = (total - tick * step) as f64;
            let particles = (MAX_PARTICLES * time_left / total as f64).round() as u32;
            [
                ConfettiBurst {
                    x: rng.random_range(0.1..0.3),
                    y: rng.random::<f64>() - 0.2,
                    particles,
                },
                ConfettiBurst {
                    x: rng.random_range(0.7..0.9),
                    y: rng.random::<f64>() - 0.2,
                    particles,
                },
            ]
        })
        .collect()
}

fn burst_script(bursts: &[ConfettiBurst]) -> String {
    let bursts = bursts
        .iter()
        .map(|burst| format!("[{:.3}, {:.3}, {}]", burst.x, burst.y, burst.particles))
        .collect::<Vec<_>>()
        .join(", ");
    BURST_SCRIPT_TEMPLATE.replace("{bursts}", &bursts)
}

/// Play the chime and run the confetti. Failures inside the webview are ignored.
pub(super) async fn celebrate() {
    let plan = plan_bursts(&mut rand::rng());
    let _ = eval(CHIME_SCRIPT);
    for bursts in plan {
        let _ = eval(&burst_script(&bursts));
        tokio::time::sleep(BURST_INTERVAL).await;
    }
}
