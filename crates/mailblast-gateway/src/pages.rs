//! Embedded static pages. The dashboard is a single HTML file driving
//! the JSON API with fetch; no build step, no assets on disk.

pub const LOGIN_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>MailBlast — Login</title>
<style>
  body { margin:0; min-height:100vh; display:flex; align-items:center; justify-content:center;
         background:#0b0b0f; color:#e4e4e7; font-family:-apple-system,'Segoe UI',sans-serif; }
  .card { background:#18181b; border:1px solid #27272a; border-radius:12px; padding:32px; width:320px; }
  h1 { margin:0 0 4px; font-size:22px; } p { margin:0 0 20px; color:#71717a; font-size:13px; }
  input { width:100%; box-sizing:border-box; margin-bottom:12px; padding:10px; border-radius:8px;
          border:1px solid #3f3f46; background:#0b0b0f; color:#e4e4e7; }
  button { width:100%; padding:10px; border:0; border-radius:8px; background:#6d28d9; color:#fff;
           font-weight:600; cursor:pointer; }
  #err { color:#f87171; font-size:13px; min-height:18px; margin-top:10px; }
</style>
</head>
<body>
<div class="card">
  <h1>📨 MailBlast</h1>
  <p>Sign in to your outreach dashboard</p>
  <input id="username" placeholder="Username" autocomplete="username">
  <input id="password" type="password" placeholder="Password" autocomplete="current-password">
  <button onclick="login()">Sign in</button>
  <div id="err"></div>
</div>
<script>
async function login() {
  const body = JSON.stringify({
    username: document.getElementById('username').value,
    password: document.getElementById('password').value,
  });
  const res = await fetch('/api/login', {method:'POST', headers:{'Content-Type':'application/json'}, body});
  const data = await res.json();
  if (data.success) { location.href = '/dashboard'; }
  else { document.getElementById('err').textContent = data.error || 'Login failed'; }
}
document.getElementById('password').addEventListener('keydown', e => { if (e.key === 'Enter') login(); });
</script>
</body>
</html>"#;

pub const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>MailBlast — Dashboard</title>
<style>
  body { margin:0; background:#0b0b0f; color:#e4e4e7; font-family:-apple-system,'Segoe UI',sans-serif; }
  header { display:flex; justify-content:space-between; align-items:center; padding:16px 24px;
           border-bottom:1px solid #27272a; }
  header h1 { margin:0; font-size:18px; }
  main { max-width:960px; margin:0 auto; padding:24px; display:grid; gap:20px; }
  section { background:#18181b; border:1px solid #27272a; border-radius:12px; padding:20px; }
  h2 { margin:0 0 14px; font-size:15px; color:#a1a1aa; }
  input, textarea, select { width:100%; box-sizing:border-box; margin-bottom:10px; padding:9px;
    border-radius:8px; border:1px solid #3f3f46; background:#0b0b0f; color:#e4e4e7; font-family:inherit; }
  textarea { min-height:90px; }
  button { padding:9px 16px; border:0; border-radius:8px; background:#6d28d9; color:#fff;
           font-weight:600; cursor:pointer; margin-right:8px; }
  button.alt { background:#27272a; }
  table { width:100%; border-collapse:collapse; font-size:13px; }
  th, td { text-align:left; padding:7px 10px; border-bottom:1px solid #27272a; }
  .stats { display:grid; grid-template-columns:repeat(4,1fr); gap:12px; }
  .stat { background:#0b0b0f; border-radius:10px; padding:14px; text-align:center; }
  .stat b { display:block; font-size:22px; }
  .stat span { color:#71717a; font-size:12px; }
  #notice { min-height:18px; font-size:13px; color:#fbbf24; }
  .badge { padding:2px 8px; border-radius:999px; font-size:11px; background:#27272a; }
</style>
</head>
<body>
<header>
  <h1>📨 MailBlast <span id="state" class="badge">idle</span></h1>
  <div>
    <button class="alt" onclick="logout()">Log out</button>
  </div>
</header>
<main>
  <div id="notice"></div>
  <section>
    <h2>Recipients</h2>
    <select id="source" onchange="sourceChanged()">
      <option value="manual">Manual entry (email,name per line)</option>
      <option value="csv">CSV upload (email column required)</option>
      <option value="find">AI contact finder</option>
    </select>
    <div id="src-text"><textarea id="content" placeholder="ana@example.com,Ana&#10;ben@example.com,Ben"></textarea></div>
    <div id="src-find" style="display:none">
      <input id="company" placeholder="Company (optional)">
      <input id="role" placeholder="Role, e.g. HR Manager">
    </div>
    <button onclick="loadRoster()">Load recipients</button>
  </section>
  <section>
    <h2>Compose</h2>
    <select id="template"></select>
    <input id="subject" placeholder="Subject (blank = template subject)">
    <textarea id="body" placeholder="Custom body (blank = template body); {{name}} and {{companyName}} are substituted"></textarea>
    <input id="from" placeholder="From address">
    <button onclick="api('/api/campaign/start', startPayload())">Start</button>
    <button class="alt" onclick="api('/api/campaign/pause')">Pause</button>
    <button class="alt" onclick="api('/api/campaign/resume')">Resume</button>
    <button class="alt" onclick="api('/api/campaign/stop')">Stop</button>
  </section>
  <section>
    <h2>Performance</h2>
    <div class="stats">
      <div class="stat"><b id="totalSent">0</b><span>Sent</span></div>
      <div class="stat"><b id="deliveries">0</b><span>Delivered</span></div>
      <div class="stat"><b id="opens">0</b><span>Opened</span></div>
      <div class="stat"><b id="bounces">0</b><span>Bounced</span></div>
    </div>
    <p id="summary" style="color:#a1a1aa;font-size:13px"></p>
    <button class="alt" onclick="summarize()">AI summary</button>
  </section>
  <section>
    <h2>Queue</h2>
    <table><thead><tr><th>#</th><th>Email</th><th>Name</th><th>Status</th><th>Error</th></tr></thead>
    <tbody id="rows"></tbody></table>
  </section>
</main>
<script>
function notice(msg) { document.getElementById('notice').textContent = msg || ''; }
function sourceChanged() {
  const v = document.getElementById('source').value;
  document.getElementById('src-text').style.display = v === 'find' ? 'none' : '';
  document.getElementById('src-find').style.display = v === 'find' ? '' : 'none';
}
async function api(url, payload) {
  const res = await fetch(url, {method:'POST', headers:{'Content-Type':'application/json'},
    body: JSON.stringify(payload || {})});
  const data = await res.json();
  notice(data.success ? '' : (data.error || 'Request failed'));
  refresh();
  return data;
}
function startPayload() {
  return {
    templateId: document.getElementById('template').value,
    subject: document.getElementById('subject').value,
    body: document.getElementById('body').value,
    from: document.getElementById('from').value,
  };
}
async function loadRoster() {
  const source = document.getElementById('source').value;
  if (source === 'find') {
    const data = await api('/api/roster/find', {
      companyName: document.getElementById('company').value,
      role: document.getElementById('role').value,
    });
    if (data.success && data.count === 0) notice('Finder returned no contacts');
  } else {
    await api('/api/roster/' + source, {content: document.getElementById('content').value});
  }
}
async function summarize() {
  const data = await api('/api/summary');
  if (data.success) document.getElementById('summary').textContent = data.summary;
}
async function logout() { await fetch('/api/logout', {method:'POST'}); location.href = '/'; }
async function refresh() {
  const res = await fetch('/api/campaign');
  if (res.status === 401) { location.href = '/'; return; }
  const data = await res.json();
  if (!data.success) return;
  const c = data.campaign;
  document.getElementById('state').textContent = c.state;
  for (const k of ['totalSent','deliveries','opens','bounces'])
    document.getElementById(k).textContent = c.stats[k];
  document.getElementById('rows').innerHTML = c.recipients.map((r, i) =>
    `<tr><td>${i + 1}</td><td>${r.email}</td><td>${r.name}</td><td>${r.status}</td><td>${r.error || ''}</td></tr>`
  ).join('');
}
async function loadTemplates() {
  const res = await fetch('/api/templates');
  const data = await res.json();
  document.getElementById('template').innerHTML =
    data.templates.map(t => `<option value="${t.id}">${t.name}</option>`).join('');
}
loadTemplates();
refresh();
setInterval(refresh, 5000);
</script>
</body>
</html>"#;
