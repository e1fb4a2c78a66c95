//! Page shell served at `/`
//!
//! Static assets (the wasm package, mascot image) are served alongside the
//! worker; this only lays out the mount points the client expects.

pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="ja">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>takoserver</title>
    <style>
        body { margin: 0; font-family: system-ui, sans-serif; background: #0b1020; color: #e8ecf5; overflow-x: hidden; }
        #particles, #mascots { position: fixed; inset: 0; pointer-events: none; z-index: 0; }
        #mascots { z-index: 5; }
        .particle { position: absolute; left: 0; top: 0; border-radius: 50%; background: #9fd3ff; }
        .mascot { position: absolute; left: 0; top: 0; width: 64px; height: 64px; }
        #hero { position: relative; height: 100vh; display: flex; align-items: center; justify-content: center; }
        #hero-shade { position: absolute; inset: 0; background: #000; opacity: 0; pointer-events: none; }
        main { position: relative; z-index: 1; max-width: 960px; margin: 0 auto; padding: 48px 16px; }
        .cards { display: grid; grid-template-columns: repeat(auto-fit, minmax(260px, 1fr)); gap: 24px; }
        .glass-card { padding: 24px; border-radius: 16px; background: rgba(255, 255, 255, 0.08); border: 1px solid rgba(255, 255, 255, 0.18); backdrop-filter: blur(12px); cursor: grab; user-select: none; will-change: transform; }
        .glass-card a { color: #9fd3ff; }
        #articles li { margin: 8px 0; }
        .fallback { color: #f5a3a3; }
        button { padding: 8px 16px; border: none; border-radius: 8px; background: #4a9eff; color: #fff; cursor: pointer; }
    </style>
</head>
<body>
    <div id="particles"></div>
    <div id="mascots"></div>
    <section id="hero">
        <h1>takoserver</h1>
        <div id="hero-shade"></div>
    </section>
    <main>
        <div class="cards">
            <div class="glass-card"><h2>About</h2><p>Rust, the web, and octopuses.</p></div>
            <div class="glass-card"><h2>Links</h2><p><a href="https://zenn.dev/takoserver">Zenn</a></p></div>
        </div>
        <h2>Articles</h2>
        <ul id="articles"></ul>
        <button id="add-mascot">Add mascot</button>
    </main>
    <script type="module">
        import init, { Stage, load_articles } from './pkg/client_wasm.js';

        async function main() {
            await init();
            const stage = new Stage();
            stage.add_particles(document.getElementById('particles'), 30);
            stage.add_mascot(document.getElementById('mascots'), '/assets/tako.png');
            document.querySelectorAll('.glass-card').forEach((el) => stage.add_card(el, 0.03, 1.0));
            stage.attach_parallax(document.getElementById('hero'), document.getElementById('hero-shade'));
            document.getElementById('add-mascot').addEventListener('click', () => {
                stage.add_mascot(document.getElementById('mascots'), '/assets/tako.png');
            });
            load_articles(document.getElementById('articles'), 'latest', 1);
        }

        main().catch((e) => console.error('Startup error:', e));
    </script>
</body>
</html>"#;
