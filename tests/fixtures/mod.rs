//! Rendered page fixtures.
//!
//! Trimmed-down copies of the markup a Sphinx build emits, enough to exercise
//! headings, API definition lists, examples and permalink markers.

#![allow(dead_code)]

/// An API reference page: one module, a class with methods, a function.
pub const API_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>Geometry &#8212; manim documentation</title>
  <script>var headings = "<h1>not a heading</h1>";</script>
</head>
<body>
<div class="document">
<section id="module-manimlib.mobject.geometry">
<h1>Geometry<a class="headerlink" href="#module-manimlib.mobject.geometry" title="Permalink">¶</a></h1>
<p>Shapes built from arcs and lines.</p>

<section id="creating-shapes">
<h2>Creating shapes<a class="headerlink" href="#creating-shapes">¶</a></h2>
<dl class="py class">
  <dt class="sig sig-object py" id="manimlib.mobject.geometry.Circle">
    <em class="property">class </em><span class="sig-name descname">Circle</span>(<em>radius=1.0</em>)
    <a class="headerlink" href="#manimlib.mobject.geometry.Circle">¶</a>
  </dt>
  <dd>
    <p>A circle.</p>
    <dl class="py method">
      <dt class="sig sig-object py" id="manimlib.mobject.geometry.Circle.get_radius">
        <span class="sig-name descname">get_radius</span>()
      </dt>
      <dd><p>Radius of the circle.</p></dd>
    </dl>
    <dl class="py method">
      <dt class="sig sig-object py" id="manimlib.mobject.geometry.Circle.surround">
        <span class="sig-name descname">surround</span>(<em>mobject</em>)
      </dt>
      <dd><p>Resize to surround a mobject.</p></dd>
    </dl>
  </dd>
</dl>
<dl class="py function">
  <dt class="sig sig-object py" id="manimlib.mobject.geometry.create_circle">
    <span class="sig-name descname">create_circle</span>(<em>radius</em>)
  </dt>
  <dd><p>Build a circle.</p></dd>
</dl>
</section>

<section id="example-circle-scene">
<h3>CircleScene<a class="headerlink" href="#example-circle-scene">¶</a></h3>
<div class="highlight-python notranslate"><div class="highlight"><pre><span class="n">circle</span> <span class="o">=</span> <span class="n">Circle</span><span class="p">()</span>
<span class="bp">self</span><span class="o">.</span><span class="n">play</span><span class="p">(</span><span class="n">ShowCreation</span><span class="p">(</span><span class="n">circle</span><span class="p">))</span>
</pre></div></div>
</section>

<div class="admonition note"><p class="admonition-title">Note</p>
<p><span class="function">square_to_circle</span> is covered in the tutorial.</p></div>
</section>
</div>
</body>
</html>
"##;

/// Labels of [`API_PAGE`]'s index entries, in document order.
pub const API_PAGE_LABELS: [&str; 8] = [
    "Geometry",
    "Creating shapes",
    "class Circle(radius=1.0)",
    "get_radius()",
    "surround(mobject)",
    "create_circle(radius)",
    "CircleScene",
    "square_to_circle",
];

/// A short landing page with too few headings for an outline.
pub const LANDING_PAGE: &str = r##"<html><head><title>manim</title></head><body>
<section id="manim"><h1>Manim<a class="headerlink" href="#manim">¶</a></h1>
<p>See <a href="api/geometry.html">Geometry</a>, <a href="getting_started/quickstart.html#install">Quickstart</a>,
<a href="genindex.html">Index</a>, <a href="https://github.com/3b1b/manim">GitHub</a>
and <a href="#manim">this page</a>.</p>
<h2>Contents</h2>
</section></body></html>
"##;

/// Markup whose entries cannot all be anchored.
pub const UNANCHORED_PAGE: &str = r##"<html><body>
<h1>Orphan heading</h1>
<div id="tips"><h2>Performance tips</h2></div>
<p><span class="method">render_frame</span></p>
</body></html>
"##;
