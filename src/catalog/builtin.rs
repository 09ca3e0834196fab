//! 内置演示活动目录
//!
//! 直连模式和所有失败回退路径共用这份数据。

use super::{CampaignPlan, CatalogEntry, FuzzyRule};

pub const GENERIC_KEY: &str = "generic";

fn entry(
    key: &str,
    (hook, offer, cta): (&str, &str, &str),
    captions: [&str; 3],
    image_url: &str,
) -> CatalogEntry {
    CatalogEntry {
        key: key.to_string(),
        plan: CampaignPlan::new(hook, offer, cta),
        captions: captions.map(str::to_string),
        image_url: image_url.to_string(),
    }
}

pub(super) fn entries() -> Vec<CatalogEntry> {
    vec![
        entry(
            "kiit robotics",
            (
                "Arre robot enthusiast, still living in 2024? 🤖 Level up your game with KIIT Robotics.",
                "Where silicon meets soul - Build autonomous systems, compete nationally, and network with industry leaders",
                "Join the revolution. Registration closes this Friday!",
            ),
            [
                "🤖 Arre robot enthusiast, still living in 2024? KIIT Robotics Club mein aao jahan silicon meets soul! Arduino se lekar ROS tak - sab kuch hands-on. Late-night debugging sessions with chai aur like-minded innovators. Registration closes Friday - don't be that person who missed out! 💯 #KIITRobotics #TechLife #BharatInnovates",
                "✨ Bhai log, KIIT campus ke tech hub mein magic ho raha hai! Robotics Club join karo aur autonomous systems build karo. Industry mentors, national competitions, aur wo satisfaction jab tumhara bot finally chale 🔥 Tea breaks mein PCB design discuss karna - yeh hai asli college life! Limited seats - jaldi karo! #Robotics #Innovation #KIITLife",
                "🚀 Tech enthusiasts, yeh sirf club nahi hai - yeh movement hai! KIIT Robotics mein join karke apne ideas ko reality banao. From sensor fusion to path planning - real engineering seekho. Plus, late-night coding sessions ke baad canteen ki Maggi hits different 😎 Registration live - apna spot claim karo! 💪 #TechClub #KIIT #RoboticsIndia",
            ],
            "https://images.unsplash.com/photo-1485827404703-89b55fcc595e?w=1024&h=1024&fit=crop",
        ),
        entry(
            "drone racing",
            (
                "Sky is not the limit anymore! 🚁",
                "India's biggest Drone Racing Championship - prizes worth 5 lakhs",
                "Register now and show your flying skills!",
            ),
            [
                "🚁 Sky is not the limit anymore! India's biggest Drone Racing Championship aa raha hai - prizes worth 5 lakhs! Register now aur apni flying skills dikhao! 🔥 #DroneRacing #TechFest",
                "✈️ Arre pilots, ready ho? Drone Racing Championship mein compete karo aur 5 lakh jeet lo! Registration open - jaldi karo! 💯 #Drones #Competition",
                "🎯 Full throttle action incoming! Drone Racing Championship mein participate karo. Massive prizes aur ultimate glory! Register abhi! 🚀 #Racing #Tech",
            ],
            "https://images.unsplash.com/photo-1473968512647-3e447244af8f?w=1024&h=1024&fit=crop",
        ),
        entry(
            "python workshop",
            (
                "Code karna seekho, future banao! 💻",
                "Free Python Workshop - beginner se advanced tak sab kuch",
                "Limited seats - register karo abhi!",
            ),
            [
                "💻 Code karna seekho, future banao! Free Python Workshop mein join karo - beginner se advanced tak sab kuch. Limited seats - register karo abhi! 🔥 #Python #Coding",
                "🐍 Python seekhne ka best mauka! Free workshop mein real projects banao aur skills upgrade karo. Registration open - jaldi karo! ✨ #LearnPython #Workshop",
                "🚀 Coding journey start karo! Python Workshop mein industry experts se seekho. Completely free - seats limited hai! 💯 #Programming #Tech",
            ],
            "https://images.unsplash.com/photo-1526374965328-7f61d4dc18c5?w=1024&h=1024&fit=crop",
        ),
        entry(
            "python ai mastery",
            (
                "Code karna seekho, automation ka king bano! 🐍✨",
                "2-day deep dive from basic syntax to building your first Neural Network. No prior experience needed, just the hunger to learn.",
                "Transform from beginner to AI builder. Registration closes in 72 hours!",
            ),
            [
                "🐍 Code karna seekho, automation ka king bano! Python & AI Mastery Workshop mein join karo - zero se hero tak ka journey. Day 1: Variables se lekar APIs tak. Day 2: Apna pehla Neural Network build karo! No laptop? No problem - we provide everything. Bas tumhara curiosity chahiye 🔥 Industry mentors, hands-on projects, aur wo moment jab tumhara first AI model predict kare correctly! Registration 72 hours mein close - don't be left behind! 💯 #PythonAI #MachineLearning #BharatCodes",
                "✨ Arre aspiring developers, yeh sirf workshop nahi - yeh transformation hai! 2 days mein Python basics se lekar Neural Networks tak. Live coding sessions, real datasets, aur practical AI projects. Chai breaks mein discuss karo gradient descent, lunch mein debug karo together 🚀 Previous batch ke students ab freelance kar rahe hain aur internships crack kar rahe hain. No prior coding experience needed - just bring your laptop aur learning mindset. Limited seats, massive impact - register abhi! 💪 #LearnAI #PythonWorkshop #TechSkills",
                "🤖 From 'Hello World' to 'Hello Neural Network' in just 48 hours! Python & AI Mastery Workshop mein seekho real-world automation, data analysis, aur ML fundamentals. Industry-standard tools: Jupyter, NumPy, Pandas, TensorFlow basics. Plus, certificate of completion aur lifetime access to course materials 💻 Instructors ne Google, Microsoft mein kaam kiya hai - unka experience ab tumhara advantage. Tea-time mein networking, night sessions mein breakthroughs. Registration closing soon - apna spot secure karo! 🎯 #AIWorkshop #Python #FutureReady",
            ],
            "https://images.unsplash.com/photo-1515879218367-8466d910aaa4?w=1024&h=1024&fit=crop",
        ),
        entry(
            "tech fest",
            (
                "Biggest tech fest of the year! 🎉",
                "3 days of innovation, competitions, and prizes worth 10 lakhs",
                "Register your team now - early bird discount live!",
            ),
            [
                "🎉 Biggest tech fest of the year aa raha hai! 3 days of innovation, competitions aur 10 lakh ke prizes! Register your team now - early bird discount live! 🔥 #TechFest #Innovation",
                "✨ Tech enthusiasts, taiyar ho jao! Mega tech fest mein participate karo - coding, robotics, AI sab kuch! Registration open - jaldi karo! 💯 #TechEvent #College",
                "🚀 Innovation ka mahaul! Tech fest mein apni skills dikhao aur massive prizes jeeto. Early bird offer - register abhi! 💪 #TechFest #Competition",
            ],
            "https://images.unsplash.com/photo-1540575467063-178a50c2df87?w=1024&h=1024&fit=crop",
        ),
        entry(
            "hackathon",
            (
                "Code. Build. Disrupt. 💻 This isn't just another hackathon.",
                "24-hour innovation marathon with FAANG mentors, ₹5L prize pool, and direct recruitment opportunities",
                "Assemble your dream team. Registration ends in 48 hours!",
            ),
            [
                "💻 Code. Build. Disrupt. Yeh sirf hackathon nahi hai - yeh tumhara launchpad hai! 24 hours of pure adrenaline with mentors from Google, Microsoft, Amazon. ₹5 lakh prize pool + direct recruitment talks. Midnight mein pizza, subah 4 baje breakthrough, aur wo feeling jab tumhara MVP finally deploy ho jaye 🔥 Squad ready karo - registration 48 hours mein close! #Hackathon #Coding #StartupIndia",
                "🚀 Arre coders, yeh tumhara Kurukshetra hai! 24-hour hackathon mein apna best idea pitch karo. Industry giants se one-on-one mentorship, unlimited chai-coffee, aur KIIT ke brightest minds ke saath collaborate karo. Last year ke winners ab unicorn mein kaam kar rahe hain - next success story tumhari ho sakti hai! Team banao, register karo - clock ticking hai! ✨ #CodeFest #Tech #Innovation",
                "⚡ Non-stop innovation incoming! Hackathon mein apna startup idea validate karo with real users aur expert feedback. Git commits at 3 AM, debugging sessions over samosas, aur wo rush jab judges tumhara demo dekh ke impressed ho jayen 💯 FAANG engineers as mentors, VC networking, plus massive prizes. Registration closing soon - don't sleep on this! #Hack #StartupLife #BharatBuilds",
            ],
            "https://images.unsplash.com/photo-1504384308090-c894fdcc538d?w=1024&h=1024&fit=crop",
        ),
        entry(
            "cultural fest",
            (
                "Rang, music, aur dhamaal! 🎭",
                "3-day cultural extravaganza with celebrity performances",
                "Passes selling fast - book yours now!",
            ),
            [
                "🎭 Rang, music, aur dhamaal! 3-day cultural extravaganza aa raha hai with celebrity performances! Passes selling fast - book yours now! 🔥 #CulturalFest #College",
                "✨ Entertainment ka full dose! Cultural fest mein dance, music, drama sab kuch. Celebrity guests bhi aa rahe hain - passes book karo! 💯 #Fest #Culture",
                "🎉 College life ka best part! Cultural fest mein unlimited masti karo. Limited passes available - jaldi book karo! 🚀 #CollegeFest #Fun",
            ],
            "https://images.unsplash.com/photo-1492684223066-81342ee5ff30?w=1024&h=1024&fit=crop",
        ),
        entry(
            "ai workshop",
            (
                "AI ka future, tumhare haath mein! 🤖",
                "Hands-on AI/ML workshop with industry experts",
                "Limited seats - register before it's too late!",
            ),
            [
                "🤖 AI ka future, tumhare haath mein! Hands-on AI/ML workshop mein join karo with industry experts. Limited seats - register before it's too late! 🔥 #AI #MachineLearning",
                "✨ Machine Learning seekho real projects ke saath! AI workshop mein practical skills gain karo. Registration open - jaldi karo! 💯 #AIWorkshop #Tech",
                "🚀 Future-proof your career! AI/ML workshop mein latest technologies seekho. Expert mentors available - register abhi! 💪 #ArtificialIntelligence #Learning",
            ],
            "https://images.unsplash.com/photo-1677442136019-21780ecad995?w=1024&h=1024&fit=crop",
        ),
        entry(
            "web development",
            (
                "Websites banao, career banao! 🌐",
                "Complete web development bootcamp - HTML to React",
                "Enroll now and get free hosting credits!",
            ),
            [
                "🌐 Websites banao, career banao! Complete web development bootcamp mein join karo - HTML to React sab kuch. Enroll now aur free hosting credits pao! 🔥 #WebDev #Coding",
                "💻 Full-stack developer bano! Web development bootcamp mein modern technologies seekho. Free hosting included - register karo! ✨ #WebDevelopment #Tech",
                "🚀 Build amazing websites! Bootcamp mein HTML, CSS, JavaScript, React sab seekho. Limited batch - enroll abhi! 💯 #WebDesign #Programming",
            ],
            "https://images.unsplash.com/photo-1547658719-da2b51169166?w=1024&h=1024&fit=crop",
        ),
        entry(
            "sports meet",
            (
                "Champions banne ka time aa gaya! 🏆",
                "Inter-college sports championship - 15+ events",
                "Register your college team today!",
            ),
            [
                "🏆 Champions banne ka time aa gaya! Inter-college sports championship mein participate karo - 15+ events! Register your college team today! 🔥 #Sports #Championship",
                "⚡ Apni fitness dikhao! Sports meet mein compete karo aur glory jeeto. Multiple events available - team register karo! 💯 #SportsMeet #College",
                "🎯 Game on! Inter-college championship mein apne college ko represent karo. Registration open - jaldi karo! 🚀 #Athletics #Competition",
            ],
            "https://images.unsplash.com/photo-1461896836934-ffe607ba8211?w=1024&h=1024&fit=crop",
        ),
        entry(
            GENERIC_KEY,
            (
                "Something amazing is coming! ✨",
                "Be part of an incredible experience",
                "Register now and don't miss out!",
            ),
            [
                "✨ Something amazing is coming! Be part of an incredible experience. Register now aur don't miss out! 🔥 #Event #Exciting",
                "🚀 Get ready for something special! Join us aur be part of the action. Limited spots - register karo! 💯 #Amazing #DontMiss",
                "🎉 Exciting times ahead! Be part of this awesome journey. Registration open - jaldi karo! ✨ #Event #JoinUs",
            ],
            "https://images.unsplash.com/photo-1492684223066-81342ee5ff30?w=1024&h=1024&fit=crop",
        ),
    ]
}

/// 模糊规则，顺序即优先级：复合短语必须排在它所包含的单词规则之前
pub(super) fn fuzzy_rules() -> Vec<FuzzyRule> {
    [
        ("robot", "kiit robotics"),
        ("drone", "drone racing"),
        ("python ai", "python ai mastery"),
        ("ai mastery", "python ai mastery"),
        ("neural", "python ai mastery"),
        ("automation", "python ai mastery"),
        ("python", "python ai mastery"),
        ("code", "python ai mastery"),
        ("coding", "python ai mastery"),
        ("ai", "python ai mastery"),
        ("ml", "python ai mastery"),
        ("machine learning", "python ai mastery"),
        ("tech", "tech fest"),
        ("fest", "tech fest"),
        ("hack", "hackathon"),
        ("cultural", "cultural fest"),
        ("culture", "cultural fest"),
        ("dance", "cultural fest"),
        ("music", "cultural fest"),
        ("web", "web development"),
        ("website", "web development"),
        ("html", "web development"),
        ("react", "web development"),
        ("sport", "sports meet"),
        ("fitness", "sports meet"),
        ("game", "sports meet"),
    ]
    .into_iter()
    .map(|(trigger, target)| FuzzyRule::new(trigger, target))
    .collect()
}
