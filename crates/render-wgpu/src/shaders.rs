/// WGSL shader for the lit reactor meshes (rings and core).
pub const REACTOR_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    camera_pos: vec4<f32>,
    // xyz position, w intensity
    light: vec4<f32>,
    // rgb ambient color, w intensity
    ambient: vec4<f32>,
    // rgb color, w opacity
    particle: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
    // rgb base color, w unused
    @location(6) base_color: vec4<f32>,
    // rgb emissive color, w intensity
    @location(7) emissive: vec4<f32>,
    // x roughness, y metalness
    @location(8) surface: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) base_color: vec4<f32>,
    @location(3) emissive: vec4<f32>,
    @location(4) surface: vec4<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    let world_pos = model * vec4<f32>(vertex.position, 1.0);
    let world_normal = (model * vec4<f32>(vertex.normal, 0.0)).xyz;

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * world_pos;
    out.world_pos = world_pos.xyz;
    out.world_normal = normalize(world_normal);
    out.base_color = instance.base_color;
    out.emissive = instance.emissive;
    out.surface = instance.surface;
    return out;
}

@fragment
fn fs_main(in: VertexOutput, @builtin(front_facing) front: bool) -> @location(0) vec4<f32> {
    var n = normalize(in.world_normal);
    if (!front) {
        n = -n;
    }
    let roughness = clamp(in.surface.x, 0.04, 1.0);
    let metalness = clamp(in.surface.y, 0.0, 1.0);

    let to_light = uniforms.light.xyz - in.world_pos;
    let l = normalize(to_light);
    let v = normalize(uniforms.camera_pos.xyz - in.world_pos);
    let h = normalize(l + v);

    let n_dot_l = max(dot(n, l), 0.0);
    let shininess = 2.0 / (roughness * roughness * roughness * roughness) - 2.0;
    let spec_strength = pow(max(dot(n, h), 0.0), max(shininess, 1.0));
    let f0 = mix(vec3<f32>(0.04), in.base_color.rgb, metalness);

    let diffuse_color = in.base_color.rgb * (1.0 - metalness);
    let light_color = vec3<f32>(uniforms.light.w);
    let ambient = uniforms.ambient.rgb * uniforms.ambient.w * diffuse_color;
    let direct = (diffuse_color + f0 * spec_strength) * light_color * n_dot_l;
    let emissive = in.emissive.rgb * in.emissive.w;

    // No tone mapping; HDR values clamp at the color target.
    return vec4<f32>(ambient + direct + emissive, 1.0);
}
"#;

/// WGSL shader for the particle point cloud.
pub const PARTICLE_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    camera_pos: vec4<f32>,
    light: vec4<f32>,
    ambient: vec4<f32>,
    particle: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@vertex
fn vs_particle(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    return uniforms.view_proj * vec4<f32>(position, 1.0);
}

@fragment
fn fs_particle() -> @location(0) vec4<f32> {
    return uniforms.particle;
}
"#;
